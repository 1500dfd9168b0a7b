// src/document/mod.rs

pub mod text_table;

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A page table as extracted: rows of optional cell text, possibly ragged.
pub type Grid = Vec<Vec<Option<String>>>;

/// One bulletin page: its full text for classification and its table grid, if any.
#[derive(Clone, Debug)]
pub struct Page {
    /// 1-based page number in the document.
    pub number: usize,
    pub text: String,
    pub grid: Option<Grid>,
}

impl Page {
    /// Build a page from extracted text, reconstructing the grid from its lines.
    pub fn from_text(number: usize, text: String) -> Self {
        let grid = text_table::grid_from_text(&text);
        Self { number, text, grid }
    }
}

/// Open PDF bytes and extract every page in document order.
pub fn open_document(bytes: &[u8]) -> Result<Vec<Page>> {
    let doc = Document::load_mem(bytes).map_err(|e| Error::UnreadableDocument(e.to_string()))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(Error::UnreadableDocument("document has no pages".into()));
    }
    debug!(pages = page_numbers.len(), "opened document");

    let mut pages = Vec::with_capacity(page_numbers.len());
    for n in page_numbers {
        let text = doc
            .extract_text(&[n])
            .map_err(|e| Error::UnreadableDocument(format!("page {}: {}", n, e)))?;
        let page = Page::from_text(n as usize, text);
        if page.grid.is_none() {
            // most pages are charts or prose
            debug!(page = n, "no table grid");
        }
        pages.push(page);
    }

    if pages.iter().all(|p| p.text.trim().is_empty()) {
        warn!("document has no extractable text");
    }
    Ok(pages)
}
