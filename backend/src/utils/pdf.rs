//! Minimal line-oriented PDF rendering for report exports.

use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_TOP_MM: f32 = 20.0;
const MARGIN_LEFT_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 7.0;
const LINES_PER_PAGE: usize = 35;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;

/// Renders a title followed by one text line per entry, paginating onto A4
/// pages as needed.
pub fn render_lines(title: &str, lines: &[String]) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!("Failed to load PDF font: {}", e))?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_TOP_MM;

    current.use_text(title, TITLE_SIZE, Mm(MARGIN_LEFT_MM), Mm(y), &font);
    y -= LINE_HEIGHT_MM * 2.0;

    let mut lines_on_page = 0usize;
    for line in lines {
        if lines_on_page >= LINES_PER_PAGE {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT_MM - MARGIN_TOP_MM;
            lines_on_page = 0;
        }

        current.use_text(line.as_str(), BODY_SIZE, Mm(MARGIN_LEFT_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
        lines_on_page += 1;
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| anyhow::anyhow!("Failed to serialize PDF: {}", e))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_a_pdf_document() {
        let bytes = render_lines("Vehicle Report", &["Tesla Model 3 (2022)".into()]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn paginates_long_reports() {
        let lines: Vec<String> = (0..100).map(|i| format!("Row {}", i)).collect();
        let bytes = render_lines("Vehicle Report", &lines).unwrap();
        // 100 rows at 35 per page needs three /Page objects.
        let pages = bytes
            .windows(b"/Type /Page".len())
            .filter(|w| *w == b"/Type /Page")
            .count();
        assert!(pages >= 3, "expected at least 3 pages, found {}", pages);
    }

    #[test]
    fn empty_report_still_renders() {
        let bytes = render_lines("Vehicle Report", &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
