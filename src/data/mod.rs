// ============================================================
// Layer 4 — Text Pipeline
// ============================================================
// Everything between the raw query and the passages handed to
// the QA model:
//
//   query
//     │
//     ▼
//   KeywordExtractor  → ranked key phrases (RAKE)
//     │
//     ▼
//   PassageRetriever  → keyword-filtered, truncated summaries
//     │
//     ▼
//   ranker::rank      → top-N passages by BM25 score
//
// Each module is responsible for exactly one step and is
// independently testable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// RAKE key-phrase extraction
pub mod keywords;

/// English stopword list
pub mod stopwords;

/// Search + summarize + keyword pre-filter
pub mod retriever;

/// BM25 Okapi passage ranking
pub mod ranker;
