//! Property tests for the overlap chunker.

use billqa_rag::chunking::{Chunker, OverlapChunker};
use billqa_rag::document::Document;
use proptest::prelude::*;

/// Generate page-like text: words joined by spaces, sentence ends, and
/// paragraph breaks, with a few multibyte characters mixed in.
fn arb_page_text() -> impl Strategy<Value = String> {
    let word = proptest::string::string_regex("[a-zA-Z0-9é€]{1,12}").unwrap();
    let sep = prop_oneof![Just(" "), Just(". "), Just("! "), Just("\n"), Just("\n\n")];
    proptest::collection::vec((word, sep), 1..60).prop_map(|parts| {
        let mut text = String::new();
        for (word, sep) in parts {
            text.push_str(&word);
            text.push_str(sep);
        }
        text
    })
}

/// Generate a valid `(chunk_size, chunk_overlap)` pair.
fn arb_params() -> impl Strategy<Value = (usize, usize)> {
    (8usize..120).prop_flat_map(|size| (Just(size), 0..size))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// De-overlapped concatenation of the chunks reconstructs the page text
    /// losslessly: no character dropped, none duplicated.
    #[test]
    fn chunks_reconstruct_the_original_text(
        text in arb_page_text(),
        (chunk_size, chunk_overlap) in arb_params(),
    ) {
        let chunker = OverlapChunker::new(chunk_size, chunk_overlap);
        let chunks = chunker.chunk(&Document::from_text("doc", text.clone()));

        let mut reconstructed = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                reconstructed.push_str(&chunk.text);
            } else {
                reconstructed.extend(chunk.text.chars().skip(chunk_overlap));
            }
        }
        prop_assert_eq!(reconstructed, text);
    }

    /// Every chunk stays within `chunk_size` characters, except a single
    /// unbroken token emitted whole.
    #[test]
    fn chunks_respect_the_size_bound(
        text in arb_page_text(),
        (chunk_size, chunk_overlap) in arb_params(),
    ) {
        let chunker = OverlapChunker::new(chunk_size, chunk_overlap);
        let chunks = chunker.chunk(&Document::from_text("doc", text));

        for chunk in &chunks {
            let len = chunk.text.chars().count();
            prop_assert!(
                len <= chunk_size || !chunk.text.contains(char::is_whitespace),
                "chunk of {len} chars exceeds {chunk_size} and is not a single token: {:?}",
                chunk.text,
            );
        }
    }

    /// Consecutive chunks overlap by exactly `chunk_overlap` characters.
    #[test]
    fn consecutive_chunks_overlap_exactly(
        text in arb_page_text(),
        (chunk_size, chunk_overlap) in arb_params(),
    ) {
        let chunker = OverlapChunker::new(chunk_size, chunk_overlap);
        let chunks = chunker.chunk(&Document::from_text("doc", text));

        for pair in chunks.windows(2) {
            let prev_len = pair[0].text.chars().count();
            prop_assert_eq!(
                pair[1].start_offset,
                pair[0].start_offset + prev_len - chunk_overlap,
            );
        }
    }

    /// Chunking the same input twice yields identical chunk sets.
    #[test]
    fn chunking_is_idempotent(
        text in arb_page_text(),
        (chunk_size, chunk_overlap) in arb_params(),
    ) {
        let chunker = OverlapChunker::new(chunk_size, chunk_overlap);
        let doc = Document::from_text("doc", text);
        prop_assert_eq!(chunker.chunk(&doc), chunker.chunk(&doc));
    }
}
