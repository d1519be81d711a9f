// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline talks to its two heavyweight collaborators only
// through these traits:
//
//   KnowledgeSource → the online encyclopedia
//                     (WikipediaClient in production,
//                      fixture sources in tests)
//   SpanReader      → the extractive QA model
//                     (LazyInferencer in production,
//                      fixture readers in tests)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use async_trait::async_trait;

use crate::domain::error::{QaError, SourceError};

// ─── KnowledgeSource ──────────────────────────────────────────────────────────
/// Anything that can look up page titles and summarize a page.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Return up to `limit` page titles matching `query`, best first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SourceError>;

    /// Return a plain-text summary of the page called `title`.
    async fn summarize(&self, title: &str) -> Result<String, SourceError>;
}

// ─── SpanReader ───────────────────────────────────────────────────────────────
/// Anything that can pull a literal answer span out of a passage.
///
/// Blocking by contract: callers run it on a blocking thread.
pub trait SpanReader: Send + Sync {
    /// Return the answer text for `question` found in `context`.
    /// An empty string is a valid answer.
    fn read_span(&self, question: &str, context: &str) -> Result<String, QaError>;
}
