use lopdf::Document;

use super::ExtractionError;

/// Extract the text layer of every page, in page order.
///
/// Returns an empty string for PDFs without a text layer (scanned pages).
pub fn extract(data: &[u8]) -> Result<String, ExtractionError> {
    let document = Document::load_mem(data)?;
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Ok(String::new());
    }

    let text = document.extract_text(&page_numbers)?;
    Ok(text.trim().to_string())
}
