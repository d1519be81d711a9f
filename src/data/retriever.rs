// ============================================================
// Layer 4 — Passage Retriever
// ============================================================
// Turns key phrases into candidate passages:
//
//   keywords ──join(" ")──▶ search ──▶ ≤ max_titles titles
//                                        │
//                          summarize each title (concurrently)
//                                        │
//            keep summaries mentioning any keyword (case-insensitive)
//                                        │
//                     truncate to passage_chars characters
//
// A title whose summary cannot be fetched (missing page,
// disambiguation page, network error) is skipped. Only a failed
// search call fails the whole retrieval.

use futures::future::join_all;
use std::sync::Arc;

use crate::domain::error::SourceError;
use crate::domain::passage::{CandidateSet, Passage};
use crate::domain::traits::KnowledgeSource;

pub const DEFAULT_MAX_TITLES:    usize = 5;
pub const DEFAULT_PASSAGE_CHARS: usize = 1000;

pub struct PassageRetriever {
    source:        Arc<dyn KnowledgeSource>,
    max_titles:    usize,
    passage_chars: usize,
}

impl PassageRetriever {
    pub fn new(source: Arc<dyn KnowledgeSource>, max_titles: usize, passage_chars: usize) -> Self {
        Self { source, max_titles, passage_chars }
    }

    pub async fn retrieve(&self, keywords: &[String]) -> Result<CandidateSet, SourceError> {
        let query  = keywords.join(" ");
        let titles = self.source.search(&query, self.max_titles).await?;
        tracing::debug!("Search '{}' returned {} titles", query, titles.len());

        // join_all preserves input order, so passages stay in
        // search-rank order regardless of which fetch finishes first
        let summaries = join_all(titles.iter().map(|t| self.source.summarize(t))).await;

        let mut passages = Vec::new();
        for (title, summary) in titles.into_iter().zip(summaries) {
            match summary {
                Ok(text) if mentions_any(&text, keywords) => {
                    passages.push(Passage::new(title, text, self.passage_chars));
                }
                Ok(_) => {
                    tracing::debug!("Dropping '{}': no keyword in summary", title);
                }
                Err(e) => {
                    tracing::debug!("Skipping '{}': {}", title, e);
                }
            }
        }

        tracing::info!("Retrieved {} candidate passages", passages.len());
        Ok(CandidateSet { passages })
    }
}

/// Case-insensitive "does `text` contain any of `keywords`".
/// Keywords are expected to be lower-case already.
pub fn mentions_any(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureSource;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_mentions_any_ignores_case() {
        assert!(mentions_any("The capital of FRANCE", &keywords(&["france"])));
        assert!(!mentions_any("The capital of Germany", &keywords(&["france"])));
        assert!(!mentions_any("anything", &[]));
    }

    #[tokio::test]
    async fn test_search_query_joins_keywords_with_spaces() {
        let source = Arc::new(FixtureSource::new());
        let r      = PassageRetriever::new(source.clone(), 5, 1000);
        r.retrieve(&keywords(&["capital city", "france"])).await.unwrap();
        assert_eq!(source.queries(), vec!["capital city france".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_titles_are_skipped() {
        let source = FixtureSource::new()
            .with_page("Paris", "Paris is the capital of France.")
            .with_missing("Paris (disambiguation)")
            .with_page("Lyon", "Lyon is a city in France.");
        let r = PassageRetriever::new(Arc::new(source), 5, 1000);

        let set = r.retrieve(&keywords(&["france"])).await.unwrap();
        assert_eq!(set.titles(), vec!["Paris", "Lyon"]);
    }

    #[tokio::test]
    async fn test_summaries_without_keywords_are_dropped() {
        let source = FixtureSource::new()
            .with_page("Paris", "Paris is the capital of France.")
            .with_page("Berlin", "Berlin is the capital of Germany.");
        let r = PassageRetriever::new(Arc::new(source), 5, 1000);

        let set = r.retrieve(&keywords(&["france"])).await.unwrap();
        assert_eq!(set.titles(), vec!["Paris"]);
    }

    #[tokio::test]
    async fn test_title_limit_is_passed_to_source() {
        let mut source = FixtureSource::new();
        for i in 0..8 {
            source = source.with_page(&format!("France {i}"), "France");
        }
        let r   = PassageRetriever::new(Arc::new(source), 5, 1000);
        let set = r.retrieve(&keywords(&["france"])).await.unwrap();
        assert_eq!(set.len(), 5);
    }

    #[tokio::test]
    async fn test_passages_truncated_but_full_text_kept() {
        let long   = format!("France {}", "x".repeat(2000));
        let source = FixtureSource::new().with_page("France", &long);
        let r      = PassageRetriever::new(Arc::new(source), 5, 1000);

        let set = r.retrieve(&keywords(&["france"])).await.unwrap();
        assert_eq!(set.passages[0].text.chars().count(), 1000);
        assert_eq!(set.passages[0].full_text, long);
    }

    #[tokio::test]
    async fn test_search_failure_is_an_error() {
        let source = FixtureSource::new().failing_search();
        let r      = PassageRetriever::new(Arc::new(source), 5, 1000);
        assert!(r.retrieve(&keywords(&["france"])).await.is_err());
    }
}
