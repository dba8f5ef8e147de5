//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`OverlapChunker`], a
//! sliding-window splitter that prefers natural boundaries (paragraph, then
//! sentence, then whitespace) over hard character cuts.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s covering the document text with no
/// gaps. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks, in reading order.
    ///
    /// Returns an empty `Vec` if the document has no printable text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits page text into overlapping fixed-size windows.
///
/// Each window covers at most `chunk_size` characters and consecutive
/// windows from the same page share exactly `chunk_overlap` characters.
/// Page boundaries break the overlap: chunking restarts on every page.
///
/// The window end prefers a natural boundary within a tolerance span before
/// falling back to a hard character cut. An unbroken token longer than
/// `chunk_size` is emitted as its own oversized chunk rather than severed.
///
/// Chunk IDs are generated as `{document_id}_p{page}_{index}` with a
/// per-page index.
///
/// # Example
///
/// ```rust,ignore
/// use billqa_rag::OverlapChunker;
///
/// let chunker = OverlapChunker::new(1000, 200);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct OverlapChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl OverlapChunker {
    /// Create a new `OverlapChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - maximum number of characters per chunk
    /// * `chunk_overlap` - characters shared between consecutive chunks;
    ///   must be less than `chunk_size` (validated by `RagConfig`)
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }

    fn chunk_page(&self, document_id: &str, page_number: usize, text: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let n = chars.len();
        let byte_of = |char_idx: usize| {
            if char_idx == n { text.len() } else { byte_offsets[char_idx] }
        };
        // How far back from the hard cut a boundary may be and still win.
        let tolerance = (self.chunk_size / 5).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut index = 0;

        while start < n {
            let end = self.window_end(&chars, start, tolerance);
            chunks.push(Chunk {
                id: format!("{document_id}_p{page_number}_{index}"),
                text: text[byte_of(start)..byte_of(end)].to_string(),
                source_page: page_number,
                start_offset: start,
            });
            index += 1;
            if end >= n {
                break;
            }
            let next = end.saturating_sub(self.chunk_overlap);
            if next <= start {
                // overlap >= size would never advance
                break;
            }
            start = next;
        }

        chunks
    }

    /// Pick the end of the window starting at `start`.
    ///
    /// The returned end always exceeds `start + chunk_overlap`, so the next
    /// window makes progress and overlaps the current one by exactly
    /// `chunk_overlap` characters.
    fn window_end(&self, chars: &[char], start: usize, tolerance: usize) -> usize {
        let n = chars.len();
        let hard_end = start + self.chunk_size;
        if hard_end >= n {
            return n;
        }

        // A cut on a token edge severs nothing.
        if chars[hard_end].is_whitespace() || chars[hard_end - 1].is_whitespace() {
            return hard_end;
        }

        let floor = (start + self.chunk_overlap + 1).max(hard_end.saturating_sub(tolerance));
        if let Some(end) = boundary_before(chars, floor, hard_end) {
            return end;
        }

        // No boundary within tolerance. If the whole window is one unbroken
        // token, emit it whole (oversized) instead of severing it.
        if chars[start..hard_end].iter().all(|c| !c.is_whitespace()) {
            let mut end = hard_end;
            while end < n && !chars[end].is_whitespace() {
                end += 1;
            }
            return end;
        }

        hard_end
    }
}

/// Find the best cut position in `floor..=ceiling`, preferring paragraph
/// breaks, then sentence ends, then any whitespace.
///
/// A cut at position `e` keeps the separator attached to the preceding
/// chunk, so candidates are positions directly after a separator.
fn boundary_before(chars: &[char], floor: usize, ceiling: usize) -> Option<usize> {
    let paragraph = |e: usize| e >= 2 && chars[e - 1] == '\n' && chars[e - 2] == '\n';
    let sentence = |e: usize| {
        chars[e - 1] == '\n'
            || (e >= 2 && chars[e - 1] == ' ' && matches!(chars[e - 2], '.' | '!' | '?'))
    };
    let whitespace = |e: usize| chars[e - 1].is_whitespace();

    for accept in [
        &paragraph as &dyn Fn(usize) -> bool,
        &sentence,
        &whitespace,
    ] {
        for e in (floor..=ceiling).rev() {
            if e >= 1 && accept(e) {
                return Some(e);
            }
        }
    }
    None
}

impl Chunker for OverlapChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        document
            .pages
            .iter()
            .flat_map(|page| self.chunk_page(&document.id, page.page_number, &page.text))
            .collect()
    }
}
