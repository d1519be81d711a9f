// ============================================================
// Layer 3 — Passage Domain Types
// ============================================================
// A Passage is one encyclopedia summary that survived the
// keyword pre-filter. The candidate set keeps three parallel
// views of the same summaries:
//
//   - the truncated text fed to ranking and QA
//   - the page title it came from
//   - the untruncated summary, kept for traceability
//
// Keeping them in one struct means the views can never drift
// out of step with each other.

use serde::{Deserialize, Serialize};

/// A single retrieved summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Encyclopedia page title
    pub title: String,

    /// The first `passage_chars` characters of the summary.
    /// May end mid-word or mid-sentence.
    pub text: String,

    /// The summary exactly as the knowledge source returned it
    pub full_text: String,
}

impl Passage {
    /// Build a passage, truncating `full_text` to at most
    /// `max_chars` Unicode scalar values.
    pub fn new(title: impl Into<String>, full_text: impl Into<String>, max_chars: usize) -> Self {
        let full_text = full_text.into();
        let text      = truncate_chars(&full_text, max_chars).to_string();
        Self { title: title.into(), text, full_text }
    }
}

/// Every passage that passed the keyword filter, in retrieval order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    pub passages: Vec<Passage>,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Truncated texts, the corpus handed to the ranker
    pub fn texts(&self) -> Vec<&str> {
        self.passages.iter().map(|p| p.text.as_str()).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.passages.iter().map(|p| p.title.as_str()).collect()
    }
}

/// Return the prefix of `text` holding at most `max_chars` chars.
/// Always cuts on a char boundary, so the result is valid UTF-8.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None                => text,
    }
}
