// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and delegates the work to Layer 2 (application).
//
//   1. `serve`: runs the HTTP API
//   2. `ask`: answers one question on stdout

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, Commands, ServeArgs};
use std::sync::Arc;

use crate::api::handlers::router;
use crate::application::answer_use_case::{AnswerUseCase, PipelineConfig};
use crate::domain::answer::Outcome;

#[derive(Parser, Debug)]
#[command(
    name = "wiki-qa",
    version,
    about = "Answer natural-language questions from Wikipedia summaries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => run_serve(args).await,
            Commands::Ask(args)   => run_ask(args).await,
        }
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let cfg: PipelineConfig = args.pipeline.into();
    let (use_case, reader)  = AnswerUseCase::from_config(&cfg)?;

    if args.eager_load {
        let loader = Arc::clone(&reader);
        tokio::task::spawn_blocking(move || loader.get().map(|_| ()))
            .await
            .context("Model loading task panicked")??;
    }
    tracing::info!("QA model loaded at startup: {}", reader.is_loaded());

    let app = router(Arc::new(use_case));
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Cannot bind {}", args.bind))?;

    tracing::info!("Listening on http://{}", args.bind);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn run_ask(args: AskArgs) -> Result<()> {
    let cfg: PipelineConfig = args.pipeline.into();
    let (use_case, _reader) = AnswerUseCase::from_config(&cfg)?;

    let outcome = use_case.answer(&args.question).await?;
    match &outcome {
        Outcome::NoKeywords => println!("No keywords found in the question."),
        Outcome::NoCandidates { keywords } => {
            println!("No matching articles for keywords: {}", keywords.join(", "));
        }
        Outcome::Answered { answers, .. } => {
            for a in answers {
                println!("{}. {}  [{}]", a.rank, a.answer, a.title);
            }
        }
    }
    Ok(())
}
