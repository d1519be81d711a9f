use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::answer::{Answer, Outcome, Status};
use crate::domain::error::QaError;

#[derive(Debug, Deserialize)]
pub struct PredictParams {
    pub search_string: String,
}

/// Body of every 200 response from `/predict`.
///
/// `"answer 1"` … `"answer k"` are flattened into the top level
/// for k = number of ranked passages; higher numbers are absent.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub status:   Status,
    #[serde(flatten)]
    pub numbered: BTreeMap<String, String>,
    pub answers:  Vec<Answer>,
    pub keywords: Vec<String>,
}

impl From<Outcome> for PredictResponse {
    fn from(outcome: Outcome) -> Self {
        let status   = outcome.status();
        let keywords = outcome.keywords().to_vec();
        let answers  = outcome.answers().to_vec();
        let numbered = answers
            .iter()
            .map(|a| (format!("answer {}", a.rank), a.answer.clone()))
            .collect();
        Self { status, numbered, answers, keywords }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status:  &'static str,
    pub error:   &'static str,
    pub message: String,
}

impl From<&QaError> for ErrorResponse {
    fn from(err: &QaError) -> Self {
        Self {
            status:  "error",
            error:   err.kind(),
            message: err.to_string(),
        }
    }
}
