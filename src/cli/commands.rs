// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `serve` and `ask`, and the
// pipeline flags they share. Every flag can also be set through
// a WIKI_QA_* environment variable.

use clap::{Args, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::answer_use_case::PipelineConfig;
use crate::data::retriever::{DEFAULT_MAX_TITLES, DEFAULT_PASSAGE_CHARS};
use crate::infra::wikipedia::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::ml::inferencer::{ModelSettings, DEFAULT_MODEL_ID, DEFAULT_TOKENIZER_ID};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Answer a single question and print the ranked answers
    Ask(AskArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "WIKI_QA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Load the QA model before accepting requests instead of on
    /// the first question
    #[arg(long, env = "WIKI_QA_EAGER_LOAD")]
    pub eager_load: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Number of ranked passages to read answers from
    #[arg(long, env = "WIKI_QA_TOP_N", default_value_t = 3)]
    pub top_n: usize,

    /// Number of search results to fetch summaries for
    #[arg(long, env = "WIKI_QA_MAX_TITLES", default_value_t = DEFAULT_MAX_TITLES)]
    pub max_titles: usize,

    /// Characters kept from each summary
    #[arg(long, env = "WIKI_QA_PASSAGE_CHARS", default_value_t = DEFAULT_PASSAGE_CHARS)]
    pub passage_chars: usize,

    /// MediaWiki Action API endpoint
    #[arg(long, env = "WIKI_QA_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "WIKI_QA_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Timeout for each encyclopedia request, in seconds
    #[arg(long, env = "WIKI_QA_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Hugging Face repo providing tokenizer.json
    #[arg(long, env = "WIKI_QA_TOKENIZER", default_value = DEFAULT_TOKENIZER_ID)]
    pub tokenizer: String,

    /// Hugging Face repo providing config.json and pytorch_model.bin
    #[arg(long, env = "WIKI_QA_MODEL", default_value = DEFAULT_MODEL_ID)]
    pub model: String,

    /// Hugging Face cache directory (defaults to the hub's own)
    #[arg(long, env = "WIKI_QA_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// The application layer never sees clap types.
impl From<PipelineArgs> for PipelineConfig {
    fn from(a: PipelineArgs) -> Self {
        PipelineConfig {
            top_n:         a.top_n,
            max_titles:    a.max_titles,
            passage_chars: a.passage_chars,
            endpoint:      a.endpoint,
            user_agent:    a.user_agent,
            timeout:       Duration::from_secs(a.timeout_secs),
            model: ModelSettings {
                tokenizer_id: a.tokenizer,
                model_id:     a.model,
                cache_dir:    a.cache_dir,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_ask_defaults() {
        let cli = Cli::try_parse_from(["wiki-qa", "ask", "--question", "Who wrote Hamlet?"]).unwrap();
        let Commands::Ask(args) = cli.command else { panic!("expected ask") };
        assert_eq!(args.question, "Who wrote Hamlet?");

        let cfg = PipelineConfig::from(args.pipeline);
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.max_titles, 5);
        assert_eq!(cfg.passage_chars, 1000);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.model.model_id, DEFAULT_MODEL_ID);
        assert!(cfg.model.cache_dir.is_none());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "wiki-qa", "serve", "--bind", "0.0.0.0:9000", "--eager-load", "--top-n", "1",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else { panic!("expected serve") };
        assert_eq!(args.bind.port(), 9000);
        assert!(args.eager_load);
        assert_eq!(args.pipeline.top_n, 1);
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["wiki-qa", "ask"]).is_err());
    }
}
