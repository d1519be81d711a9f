// ============================================================
// Layer 2 — Answer Use Case
// ============================================================
// The whole pipeline for one question, strictly in sequence:
//
//   1. Extract key phrases from the question
//   2. Retrieve keyword-filtered encyclopedia summaries
//   3. Rank them with BM25 against the question, keep top N
//   4. Read one answer span out of each ranked passage
//
// Empty intermediate results end the pipeline early with a
// defined Outcome; real failures come back as QaError.

use std::sync::Arc;
use std::time::Duration;

use crate::data::{keywords::KeywordExtractor, ranker, retriever::PassageRetriever};
use crate::domain::answer::{Answer, Outcome};
use crate::domain::error::QaError;
use crate::domain::traits::{KnowledgeSource, SpanReader};
use crate::infra::wikipedia::WikipediaClient;
use crate::ml::inferencer::{LazyInferencer, ModelSettings};

/// Everything the pipeline needs, free of any CLI types.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many ranked passages (and so answers) to produce
    pub top_n:         usize,
    /// How many titles to request from the search endpoint
    pub max_titles:    usize,
    /// Characters of each summary kept for ranking and QA
    pub passage_chars: usize,
    pub endpoint:      String,
    pub user_agent:    String,
    pub timeout:       Duration,
    pub model:         ModelSettings,
}

pub struct AnswerUseCase {
    extractor: KeywordExtractor,
    retriever: PassageRetriever,
    reader:    Arc<dyn SpanReader>,
    top_n:     usize,
}

impl AnswerUseCase {
    pub fn new(
        source: Arc<dyn KnowledgeSource>,
        reader: Arc<dyn SpanReader>,
        cfg:    &PipelineConfig,
    ) -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            retriever: PassageRetriever::new(source, cfg.max_titles, cfg.passage_chars),
            reader,
            top_n:     cfg.top_n,
        }
    }

    /// Wire the production collaborators: Wikipedia over HTTP and
    /// the lazily loaded DistilBERT reader. The reader is returned
    /// too so callers can warm it up ahead of the first question.
    pub fn from_config(cfg: &PipelineConfig) -> anyhow::Result<(Self, Arc<LazyInferencer>)> {
        let source = WikipediaClient::new(&cfg.endpoint, &cfg.user_agent, cfg.timeout)?;
        let reader = Arc::new(LazyInferencer::new(cfg.model.clone()));
        let use_case = Self::new(Arc::new(source), reader.clone(), cfg);
        Ok((use_case, reader))
    }

    pub async fn answer(&self, question: &str) -> Result<Outcome, QaError> {
        let keywords = self.extractor.extract(question);
        if keywords.is_empty() {
            tracing::info!("No keywords in question '{}'", question);
            return Ok(Outcome::NoKeywords);
        }
        tracing::debug!("Keywords: {:?}", keywords);

        let candidates = self.retriever.retrieve(&keywords).await?;
        if candidates.is_empty() {
            tracing::info!("No candidate passages for '{}'", question);
            return Ok(Outcome::NoCandidates { keywords });
        }
        tracing::debug!("{} candidates: {:?}", candidates.len(), candidates.titles());

        let ranked = ranker::rank(&candidates.texts(), question, self.top_n)?;
        tracing::debug!("Ranked order: {:?}", ranked);

        let mut answers = Vec::with_capacity(ranked.len());
        for (position, idx) in ranked.into_iter().enumerate() {
            let passage = &candidates.passages[idx];
            tracing::debug!(
                "Reading '{}' ({} of {} chars)",
                passage.title, passage.text.chars().count(), passage.full_text.chars().count()
            );
            let text    = self.read_span(question, &passage.text).await?;
            answers.push(Answer {
                rank:   position + 1,
                title:  passage.title.clone(),
                answer: text,
            });
        }

        tracing::info!("Answered '{}' from {} passages", question, answers.len());
        Ok(Outcome::Answered { keywords, answers, requested: self.top_n })
    }

    async fn read_span(&self, question: &str, context: &str) -> Result<String, QaError> {
        let reader   = Arc::clone(&self.reader);
        let question = question.to_string();
        let context  = context.to_string();

        tokio::task::spawn_blocking(move || reader.read_span(&question, &context))
            .await
            .map_err(|e| QaError::Inference(format!("Inference task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::Status;
    use crate::testing::{FixtureReader, FixtureSource};

    const PARIS: &str = "Paris is the capital and largest city of France. It is the \
        seat of the French government and the capital of the Île-de-France region.";
    const LYON: &str = "Lyon is the third-largest city of France and a centre of \
        French gastronomy.";
    const FRANCE: &str = "France is a country in Western Europe. Its capital is Paris.";
    const EIFFEL: &str = "The Eiffel Tower is a wrought-iron lattice tower in Paris.";

    fn config() -> PipelineConfig {
        PipelineConfig {
            top_n:         3,
            max_titles:    5,
            passage_chars: 1000,
            endpoint:      "http://localhost".into(),
            user_agent:    "test".into(),
            timeout:       Duration::from_secs(1),
            model:         ModelSettings::default(),
        }
    }

    fn use_case(source: FixtureSource, reader: FixtureReader) -> (AnswerUseCase, Arc<FixtureSource>, Arc<FixtureReader>) {
        let source = Arc::new(source);
        let reader = Arc::new(reader);
        let uc = AnswerUseCase::new(source.clone(), reader.clone(), &config());
        (uc, source, reader)
    }

    #[tokio::test]
    async fn test_empty_question_has_no_keywords() {
        let (uc, source, reader) = use_case(FixtureSource::new(), FixtureReader::new());
        let outcome = uc.answer("").await.unwrap();
        assert_eq!(outcome, Outcome::NoKeywords);
        assert!(source.queries().is_empty());
        assert!(reader.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_lookups_failing_gives_no_candidates() {
        let source = FixtureSource::new()
            .with_missing("France")
            .with_missing("Capital city");
        let (uc, _, reader) = use_case(source, FixtureReader::new());

        let outcome = uc.answer("What is the capital of France?").await.unwrap();
        assert_eq!(outcome.status(), Status::NoCandidates);
        assert!(outcome.answers().is_empty());
        assert!(reader.calls().is_empty());
    }

    #[tokio::test]
    async fn test_capital_of_france() {
        let source = FixtureSource::new()
            .with_page("Lyon", LYON)
            .with_page("Eiffel Tower", EIFFEL)
            .with_page("Paris", PARIS)
            .with_page("France", FRANCE);
        let reader = FixtureReader::new().answering("Paris", "Paris");
        let (uc, source, _) = use_case(source, reader);

        let outcome = uc.answer("What is the capital of France?").await.unwrap();
        assert_eq!(outcome.status(), Status::Answered);
        assert!(outcome.keywords().contains(&"capital".to_string()));
        assert!(outcome.keywords().contains(&"france".to_string()));
        assert_eq!(source.queries().len(), 1);

        let answers = outcome.answers();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers[0].title, "Paris");
        assert_eq!(answers[0].answer, "Paris");
        assert_eq!(answers[0].rank, 1);
        // The Eiffel Tower summary mentions neither keyword
        assert!(answers.iter().all(|a| a.title != "Eiffel Tower"));
    }

    #[tokio::test]
    async fn test_single_passage_gives_single_answer() {
        let source = FixtureSource::new().with_page("Paris", PARIS);
        let reader = FixtureReader::new().answering("Paris", "Paris");
        let (uc, _, _) = use_case(source, reader);

        let outcome = uc.answer("What is the capital of France?").await.unwrap();
        assert_eq!(outcome.status(), Status::Partial);
        assert_eq!(outcome.answers().len(), 1);
        assert_eq!(outcome.answers()[0].answer, "Paris");
    }

    #[tokio::test]
    async fn test_reader_sees_truncated_passage() {
        let long   = format!("France {}", "é".repeat(1500));
        let source = FixtureSource::new().with_page("France", &long);
        let (uc, _, reader) = use_case(source, FixtureReader::new());

        let outcome = uc.answer("Where is France?").await.unwrap();
        assert_eq!(outcome.answers()[0].answer, "");
        let calls = reader.calls();
        assert_eq!(calls[0].0, "Where is France?");
        assert_eq!(calls[0].1.chars().count(), 1000);
    }

    #[tokio::test]
    async fn test_search_failure_is_upstream_error() {
        let source = FixtureSource::new().failing_search();
        let (uc, _, _) = use_case(source, FixtureReader::new());

        let err = uc.answer("What is the capital of France?").await.unwrap_err();
        assert_eq!(err.kind(), "upstream_unavailable");
    }

    #[tokio::test]
    async fn test_reader_failure_is_inference_error() {
        let source = FixtureSource::new().with_page("Paris", PARIS);
        let (uc, _, _) = use_case(source, FixtureReader::new().failing());

        let err = uc.answer("What is the capital of France?").await.unwrap_err();
        assert_eq!(err.kind(), "inference_failed");
    }
}
