//! Fixed prompt templates for query rephrasing and answer synthesis.
//!
//! Both templates are pure string-formatting functions with named slots.
//! Filling never fails; an empty context string is valid input and the
//! answer template still carries the full instruction block, which is what
//! steers the model toward the refusal string.

use billqa_rag::document::SearchResult;

/// The fallback emitted verbatim when the context cannot answer the question.
pub const REFUSAL: &str =
    "The provided Finance Bill document does not contain information to answer that question.";

/// Separator between retrieved chunk texts in the composed context.
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Build the query-rephrasing prompt.
///
/// Asks the model to optionally restate the question so it retrieves more
/// precise context from the finance-bill index. Whether the output is used
/// for retrieval is the session's choice, not the template's.
pub fn rephrase_prompt(question: &str) -> String {
    format!(
        "You are an AI assistant. Your task is to take the user's question
and, if needed, rephrase it slightly so that it retrieves the most relevant
and precise context from a vector database built on the provided Finance Bill document.

The goal is to maximize the chance of finding exact or very close answers
within the document.

User Question:
{question}
"
    )
}

/// Build the answer-synthesis prompt from retrieved context and the
/// original question.
///
/// The instruction block constrains the model to the supplied context and
/// names the exact refusal string to emit when the context is insufficient.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "You are an AI assistant for question-answering tasks.
Use only the following context extracted from the Finance Bill PDF:

Context:
{context}

Question:
{question}

Instructions:
- If the answer is in the context, provide a clear and concise response.
- If the information is NOT in the context, say:
  \"{REFUSAL}\"

Answer:
"
    )
}

/// Concatenate retrieved chunk texts, in retrieval order, into the context
/// slot of the answer template.
pub fn join_context(results: &[SearchResult]) -> String {
    results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use billqa_rag::document::Chunk;

    fn result(text: &str) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: "doc_p1_0".into(),
                text: text.into(),
                source_page: 1,
                start_offset: 0,
            },
            score: 0.9,
        }
    }

    #[test]
    fn answer_prompt_carries_the_instruction_block() {
        let prompt = answer_prompt("Section 12: Tax rate is 15%.", "What is the tax rate?");
        assert!(prompt.contains("Use only the following context"));
        assert!(prompt.contains("Section 12: Tax rate is 15%."));
        assert!(prompt.contains("What is the tax rate?"));
        assert!(prompt.contains(REFUSAL));
    }

    #[test]
    fn empty_context_is_valid_and_keeps_the_instructions() {
        let prompt = answer_prompt("", "Anything?");
        assert!(prompt.contains("Use only the following context"));
        assert!(prompt.contains(REFUSAL));
    }

    #[test]
    fn rephrase_prompt_carries_the_question() {
        let prompt = rephrase_prompt("What is the digital services levy?");
        assert!(prompt.contains("rephrase it slightly"));
        assert!(prompt.contains("What is the digital services levy?"));
    }

    #[test]
    fn context_joins_chunks_in_retrieval_order() {
        let joined = join_context(&[result("first"), result("second")]);
        assert_eq!(joined, "first\n\nsecond");
    }

    #[test]
    fn empty_results_join_to_an_empty_context() {
        assert_eq!(join_context(&[]), "");
    }
}
