//! Assembles downloadable report documents.

use chrono::Utc;

use crate::utils::csv::guard_formula;
use crate::utils::pdf;

/// A finished export: raw bytes plus the headers a download response needs.
#[derive(Debug)]
pub struct ExportDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Builds a CSV export. Every cell passes through the formula guard.
pub fn csv_document(
    name: &str,
    headers: &[&str],
    rows: Vec<Vec<String>>,
) -> anyhow::Result<ExportDocument> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;

    for row in rows {
        let guarded: Vec<String> = row.iter().map(|cell| guard_formula(cell)).collect();
        writer.write_record(&guarded)?;
    }

    let bytes = writer.into_inner()?;

    Ok(ExportDocument {
        bytes,
        content_type: "text/csv",
        filename: timestamped_filename(name, "csv"),
    })
}

/// Builds a PDF export with a title line followed by one row of text per
/// entry.
pub fn pdf_document(name: &str, title: &str, lines: &[String]) -> anyhow::Result<ExportDocument> {
    let bytes = pdf::render_lines(title, lines)?;

    Ok(ExportDocument {
        bytes,
        content_type: "application/pdf",
        filename: timestamped_filename(name, "pdf"),
    })
}

fn timestamped_filename(name: &str, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        name,
        Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}
