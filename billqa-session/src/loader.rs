//! PDF loading: extract page-level text records from an uploaded file.
//!
//! Extraction shells out to the `pdftotext` binary (poppler). The tool
//! separates pages with a form feed, which maps directly onto the
//! [`Page`] records the chunker consumes.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use billqa_rag::document::{Document, Page};

use crate::error::LoadError;

/// Form feed, emitted by `pdftotext` after every page.
const PAGE_SEPARATOR: char = '\u{c}';

/// Load a PDF file into a [`Document`] of page records.
///
/// The document ID is derived from the file stem. Pages are numbered from 1
/// in physical order. The whole file is processed or the load fails; there
/// is no partial result.
///
/// # Errors
///
/// - [`LoadError::Io`] if the file cannot be read
/// - [`LoadError::Extractor`] if `pdftotext` fails or is missing
/// - [`LoadError::EmptyDocument`] if no text could be extracted
pub fn load_pdf(path: &Path) -> Result<Document, LoadError> {
    let bytes = std::fs::read(path)?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let text = extract_text(&bytes)?;
    if text.trim().is_empty() {
        warn!(path = %path.display(), "extractor produced no text");
        return Err(LoadError::EmptyDocument(path.display().to_string()));
    }

    let pages = split_pages(&text);
    info!(document.id = %id, page_count = pages.len(), "loaded document");

    Ok(Document { id, pages })
}

/// Run `pdftotext -layout -enc UTF-8` over the PDF bytes and capture stdout.
fn extract_text(bytes: &[u8]) -> Result<String, LoadError> {
    let mut scratch = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .map_err(LoadError::Io)?;
    scratch.write_all(bytes).map_err(LoadError::Io)?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg(scratch.path())
        .arg("-")
        .output()
        .map_err(|e| LoadError::Extractor(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(%stderr, "pdftotext exited with failure");
        return Err(LoadError::Extractor(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Split extracted text on the form-feed page separator into 1-based pages.
///
/// `pdftotext` emits a trailing form feed, so a final empty fragment is
/// dropped; every other fragment is kept, even if blank, so page numbers
/// stay aligned with the physical document.
fn split_pages(text: &str) -> Vec<Page> {
    let mut fragments: Vec<&str> = text.split(PAGE_SEPARATOR).collect();
    if fragments.len() > 1 && fragments.last().is_some_and(|last| last.trim().is_empty()) {
        fragments.pop();
    }

    fragments
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| Page { page_number: i + 1, text: fragment.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed_into_numbered_pages() {
        let pages = split_pages("first page\u{c}second page\u{c}");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "first page");
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text, "second page");
    }

    #[test]
    fn keeps_blank_interior_pages_for_numbering() {
        let pages = split_pages("one\u{c}\u{c}three\u{c}");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, "");
        assert_eq!(pages[2].page_number, 3);
    }

    #[test]
    fn single_fragment_becomes_page_one() {
        let pages = split_pages("just text, no separator");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
    }
}
