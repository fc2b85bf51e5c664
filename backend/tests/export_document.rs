use chrono::{TimeZone, Utc};

use carsplatform_backend::services::export;

#[test]
fn vehicle_csv_has_expected_header_and_rows() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let rows = vec![
        vec![
            "Tesla".to_string(),
            "Model 3".to_string(),
            "2022".to_string(),
            "5YJ3E1EA7KF317000".to_string(),
            created.to_rfc3339(),
        ],
        vec![
            "Ford".to_string(),
            "Focus".to_string(),
            "2018".to_string(),
            "1FADP3F20EL123456".to_string(),
            created.to_rfc3339(),
        ],
    ];

    let doc = export::csv_document("vehicles", &["Make", "Model", "Year", "VIN", "Created At"], rows)
        .unwrap();
    let text = String::from_utf8(doc.bytes).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("Make,Model,Year,VIN,Created At"));
    let first = lines.next().unwrap();
    assert!(first.starts_with("Tesla,Model 3,2022,5YJ3E1EA7KF317000,"));
    assert!(first.contains("2024-05-01T12:00:00+00:00"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn csv_cells_starting_with_formula_characters_are_guarded() {
    let rows = vec![vec!["=SUM(A1:A9)".to_string(), "@cmd".to_string()]];
    let doc = export::csv_document("vehicles", &["Make", "Model"], rows).unwrap();
    let text = String::from_utf8(doc.bytes).unwrap();

    assert!(text.contains("'=SUM(A1:A9)"));
    assert!(text.contains("'@cmd"));
}

#[test]
fn csv_filename_is_timestamped() {
    let doc = export::csv_document("vehicles", &["Make"], vec![]).unwrap();
    assert!(doc.filename.starts_with("vehicles_"));
    assert!(doc.filename.ends_with(".csv"));
    // vehicles_YYYYMMDD_HHMMSS.csv
    assert_eq!(doc.filename.len(), "vehicles_".len() + 15 + ".csv".len());
}

#[test]
fn pdf_export_renders_a_document() {
    let lines: Vec<String> = (0..40)
        .map(|i| format!("Vehicle {} | VIN TEST{:013}", i, i))
        .collect();
    let doc = export::pdf_document("vehicles", "Vehicle Report", &lines).unwrap();

    assert!(doc.bytes.starts_with(b"%PDF"));
    assert_eq!(doc.content_type, "application/pdf");
    assert!(doc.filename.ends_with(".pdf"));
}

#[test]
fn empty_exports_still_produce_documents() {
    let csv = export::csv_document("vehicles", &["Make"], vec![]).unwrap();
    assert_eq!(String::from_utf8(csv.bytes).unwrap(), "Make\n");

    let pdf = export::pdf_document("vehicles", "Vehicle Report", &[]).unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF"));
}
