// ============================================================
// Layer 6 — Wikipedia Client
// ============================================================
// KnowledgeSource backed by the MediaWiki Action API:
//
//   search    → action=query&list=search&srsearch=…&srlimit=N
//   summarize → action=query&prop=extracts|pageprops
//               &exintro&explaintext&redirects&titles=…
//
// Summaries are the plain-text lead section of the page.
// Missing pages and disambiguation pages are reported as
// errors so the retriever can skip them.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::error::SourceError;
use crate::domain::traits::KnowledgeSource;

pub const DEFAULT_ENDPOINT:   &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = concat!("wiki-qa/", env!("CARGO_PKG_VERSION"));

pub struct WikipediaClient {
    http:     reqwest::Client,
    endpoint: String,
}

impl WikipediaClient {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint: endpoint.into() })
    }

    async fn query<T: for<'de> Deserialize<'de>>(&self, params: &[(&str, &str)]) -> Result<T, SourceError> {
        let response = self.http
            .get(&self.endpoint)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

// ─── Response shapes (formatversion=2) ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    query: Option<PageQuery>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

impl SearchResponse {
    fn into_titles(self) -> Vec<String> {
        self.query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default()
    }
}

impl PageResponse {
    fn into_summary(self, title: &str) -> Result<String, SourceError> {
        let page = self.query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| SourceError::Malformed(format!("no page entry for '{title}'")))?;

        if page.missing || page.invalid {
            return Err(SourceError::Missing(title.to_string()));
        }
        if page.pageprops.is_some_and(|p| p.disambiguation.is_some()) {
            return Err(SourceError::Ambiguous(title.to_string()));
        }
        match page.extract {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(SourceError::Missing(title.to_string())),
        }
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        let limit = limit.to_string();
        let response: SearchResponse = self
            .query(&[
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", &limit),
                ("srprop", ""),
            ])
            .await?;
        Ok(response.into_titles())
    }

    async fn summarize(&self, title: &str) -> Result<String, SourceError> {
        let response: PageResponse = self
            .query(&[
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;
        response.into_summary(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_titles_in_rank_order() {
        let json = r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":2},
            "search":[{"ns":0,"title":"Paris"},{"ns":0,"title":"France"}]}}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_titles(), vec!["Paris", "France"]);
    }

    #[test]
    fn test_empty_search_has_no_titles() {
        let resp: SearchResponse = serde_json::from_str(r#"{"batchcomplete":true}"#).unwrap();
        assert!(resp.into_titles().is_empty());
    }

    #[test]
    fn test_summary_extract() {
        let json = r#"{"query":{"pages":[{"pageid":22989,"ns":0,"title":"Paris",
            "extract":"Paris is the capital and largest city of France."}]}}"#;
        let resp: PageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_summary("Paris").unwrap(),
            "Paris is the capital and largest city of France."
        );
    }

    #[test]
    fn test_missing_page() {
        let json = r#"{"query":{"pages":[{"ns":0,"title":"Qwzx","missing":true}]}}"#;
        let resp: PageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_summary("Qwzx").unwrap_err(),
            SourceError::Missing("Qwzx".into())
        );
    }

    #[test]
    fn test_disambiguation_page() {
        let json = r#"{"query":{"pages":[{"pageid":1,"ns":0,"title":"Mercury",
            "extract":"Mercury may refer to:","pageprops":{"disambiguation":""}}]}}"#;
        let resp: PageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_summary("Mercury").unwrap_err(),
            SourceError::Ambiguous("Mercury".into())
        );
    }

    #[test]
    fn test_client_builds_with_defaults() {
        let client = WikipediaClient::new(DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, Duration::from_secs(10));
        assert!(client.is_ok());
    }
}
