// ============================================================
// Layer 3 — Answers and Outcomes
// ============================================================
// The result of one question. An extractive answer is a span
// copied out of a ranked passage; it can legitimately be empty
// when the model's end position precedes its start position.
//
// Outcome replaces "one generic failure string" with a value
// the caller can match on:
//
//   NoKeywords    → the query had nothing to search for
//   NoCandidates  → the search ran but no summary survived
//   Answered      → one answer per ranked passage (may be fewer
//                   than requested, see `status()`)

use serde::{Deserialize, Serialize};

/// One extracted answer, tagged with the page it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// 1-based position of the source passage in the ranking
    pub rank: usize,

    /// Title of the encyclopedia page the passage came from
    pub title: String,

    /// The literal span text (possibly empty)
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Answered,
    Partial,
    NoKeywords,
    NoCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoKeywords,
    NoCandidates {
        keywords: Vec<String>,
    },
    Answered {
        keywords:  Vec<String>,
        answers:   Vec<Answer>,
        requested: usize,
    },
}

impl Outcome {
    pub fn status(&self) -> Status {
        match self {
            Outcome::NoKeywords          => Status::NoKeywords,
            Outcome::NoCandidates { .. } => Status::NoCandidates,
            Outcome::Answered { answers, requested, .. } => {
                if answers.len() < *requested {
                    Status::Partial
                } else {
                    Status::Answered
                }
            }
        }
    }

    pub fn answers(&self) -> &[Answer] {
        match self {
            Outcome::Answered { answers, .. } => answers,
            _                                 => &[],
        }
    }

    pub fn keywords(&self) -> &[String] {
        match self {
            Outcome::NoKeywords                       => &[],
            Outcome::NoCandidates { keywords }        => keywords,
            Outcome::Answered { keywords, .. }        => keywords,
        }
    }
}
