//! Read back rendered documents
//!
//! Only understands text written by [`PdfCanvas`](crate::canvas::PdfCanvas).

use lopdf::content::Content;
use lopdf::{Document, Object};

use crate::error::RenderError;
use crate::font::decode_text;

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<usize, RenderError> {
    let doc = Document::load_mem(bytes).map_err(|e| RenderError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len())
}

/// Strings drawn on each page, in drawing order
pub fn page_strings(bytes: &[u8]) -> Result<Vec<Vec<String>>, RenderError> {
    let doc = Document::load_mem(bytes).map_err(|e| RenderError::ParseError(e.to_string()))?;

    let mut pages = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let raw = doc
            .get_page_content(page_id)
            .map_err(|e| RenderError::ParseError(e.to_string()))?;
        let content =
            Content::decode(&raw).map_err(|e| RenderError::ParseError(e.to_string()))?;

        let strings = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(decode_text(bytes)),
                _ => None,
            })
            .collect();
        pages.push(strings);
    }
    Ok(pages)
}
