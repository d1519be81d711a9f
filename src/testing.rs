// Test doubles for the pipeline's collaborators.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::error::{QaError, SourceError};
use crate::domain::traits::{KnowledgeSource, SpanReader};

/// In-memory encyclopedia. `search` ignores the query text and
/// returns every known title in insertion order, up to `limit`.
#[derive(Default)]
pub struct FixtureSource {
    pages:        Vec<(String, Result<String, SourceError>)>,
    fail_search:  bool,
    queries:      Mutex<Vec<String>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, title: &str, summary: &str) -> Self {
        self.pages.push((title.to_string(), Ok(summary.to_string())));
        self
    }

    pub fn with_missing(mut self, title: &str) -> Self {
        self.pages.push((title.to_string(), Err(SourceError::Missing(title.to_string()))));
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl KnowledgeSource for FixtureSource {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        self.queries.lock().push(query.to_string());
        if self.fail_search {
            return Err(SourceError::Transport("connection refused".into()));
        }
        Ok(self.pages.iter().take(limit).map(|(t, _)| t.clone()).collect())
    }

    async fn summarize(&self, title: &str) -> Result<String, SourceError> {
        self.pages
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, summary)| summary.clone())
            .unwrap_or_else(|| Err(SourceError::Missing(title.to_string())))
    }
}

/// Answers with the first configured answer whose needle appears
/// in the context, or the empty string.
#[derive(Default)]
pub struct FixtureReader {
    answers: Vec<(String, String)>,
    fail:    bool,
    calls:   Mutex<Vec<(String, String)>>,
}

impl FixtureReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(mut self, needle: &str, answer: &str) -> Self {
        self.answers.push((needle.to_string(), answer.to_string()));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// (question, context) pairs seen so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

impl SpanReader for FixtureReader {
    fn read_span(&self, question: &str, context: &str) -> Result<String, QaError> {
        self.calls.lock().push((question.to_string(), context.to_string()));
        if self.fail {
            return Err(QaError::Inference("fixture reader failure".into()));
        }
        Ok(self
            .answers
            .iter()
            .find(|(needle, _)| context.contains(needle.as_str()))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_default())
    }
}
