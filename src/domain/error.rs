// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every way a question can fail to produce answers, as typed
// values. "Nothing found" is NOT in here: an empty keyword list
// or an empty candidate set is a normal Outcome (see answer.rs),
// not an error.

use thiserror::Error;

/// Failures reported by a knowledge source.
///
/// During retrieval a per-title failure only drops that title;
/// the same error from `search` fails the whole question.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("page '{0}' does not exist")]
    Missing(String),

    #[error("'{0}' is a disambiguation page")]
    Ambiguous(String),

    #[error("unexpected response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("no documents to rank")]
    EmptyCorpus,
}

/// Errors that abort a question.
#[derive(Debug, Error)]
pub enum QaError {
    #[error("knowledge source unavailable: {0}")]
    Upstream(#[from] SourceError),

    #[error("ranking failed: {0}")]
    Ranking(#[from] RankError),

    #[error("model could not be loaded: {0}")]
    ModelLoad(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl QaError {
    /// Stable machine-readable name, used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            QaError::Upstream(_)  => "upstream_unavailable",
            QaError::Ranking(_)   => "ranking_failed",
            QaError::ModelLoad(_) => "model_load_failed",
            QaError::Inference(_) => "inference_failed",
        }
    }
}
