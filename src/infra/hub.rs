// ============================================================
// Layer 6 — Model Hub Fetcher
// ============================================================
// Downloads files from the Hugging Face Hub into the local hub
// cache (or returns the cached copy). Used for the tokenizer,
// the model config and the pretrained weights.

use anyhow::{Context, Result};
use hf_hub::api::sync::{Api, ApiBuilder};
use std::path::PathBuf;

pub struct HubFetcher {
    api: Api,
}

impl HubFetcher {
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut builder = ApiBuilder::new().with_progress(false);
        if let Some(dir) = cache_dir {
            builder = builder.with_cache_dir(dir);
        }
        let api = builder.build().context("Cannot initialise Hugging Face Hub client")?;
        Ok(Self { api })
    }

    /// Local path of `file` from model repository `repo_id`.
    pub fn fetch(&self, repo_id: &str, file: &str) -> Result<PathBuf> {
        tracing::debug!("Fetching '{}' from '{}'", file, repo_id);
        self.api
            .model(repo_id.to_string())
            .get(file)
            .with_context(|| format!("Cannot fetch '{file}' from '{repo_id}'"))
    }
}
