// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs the pretrained QA model over one (question, passage) pair
// and decodes the predicted span back into text:
//
//   [CLS] question [SEP] passage [SEP]
//        │
//        ▼  forward pass
//   start scores, end scores   (one per input token)
//        │
//        ▼  argmax of each, independently
//   ids[start..=end] → decode, skipping special tokens
//
// Start and end are chosen independently: when the best end
// precedes the best start the span is empty and so is the answer.
//
// The model and tokenizer are loaded once per process by
// LazyInferencer and shared by every request after that.

use anyhow::Context;
use burn::prelude::*;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::path::PathBuf;
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};

use crate::domain::error::QaError;
use crate::domain::traits::SpanReader;
use crate::infra::{checkpoint::WeightStore, hub::HubFetcher, tokenizer_store::TokenizerStore};
use crate::ml::model::DistilBertQa;

pub type InferBackend = burn::backend::NdArray;
type InferDevice = <InferBackend as Backend>::Device;

pub const DEFAULT_TOKENIZER_ID: &str = "distilbert-base-uncased";
pub const DEFAULT_MODEL_ID:     &str = "distilbert-base-uncased-distilled-squad";

/// Where to fetch the tokenizer and the QA weights from.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub tokenizer_id: String,
    pub model_id:     String,
    /// Hub cache directory; `None` uses the hub's default
    pub cache_dir:    Option<PathBuf>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            tokenizer_id: DEFAULT_TOKENIZER_ID.to_string(),
            model_id:     DEFAULT_MODEL_ID.to_string(),
            cache_dir:    None,
        }
    }
}

pub struct Inferencer {
    // burn modules are Send but not Sync; one forward pass at a time
    model:     Mutex<DistilBertQa<InferBackend>>,
    tokenizer: Tokenizer,
    device:    InferDevice,
}

impl Inferencer {
    pub fn new(model: DistilBertQa<InferBackend>, tokenizer: Tokenizer, device: InferDevice) -> Self {
        Self { model: Mutex::new(model), tokenizer, device }
    }

    /// Download (or reuse cached) tokenizer, config and weights,
    /// then build the model.
    pub fn load(settings: &ModelSettings) -> Result<Self, QaError> {
        Self::try_load(settings).map_err(|e| QaError::ModelLoad(format!("{e:#}")))
    }

    fn try_load(settings: &ModelSettings) -> anyhow::Result<Self> {
        let device = InferDevice::default();
        let hub    = HubFetcher::new(settings.cache_dir.clone())?;

        let weights = WeightStore::new(&hub, &settings.model_id);
        let config  = weights.load_config()?;
        let model   = weights.load_model(config.init::<InferBackend>(&device), &device)?;

        let mut tokenizer = TokenizerStore::new(&hub).load(&settings.tokenizer_id)?;
        // Position embeddings stop at max_position_embeddings, so
        // long pairs lose passage tokens, never question tokens.
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_position_embeddings,
                strategy:   TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Cannot configure truncation: {e}"))?;
        tokenizer.with_padding(None);

        tracing::info!(
            "QA model '{}' loaded ({} layers, tokenizer '{}')",
            settings.model_id, config.n_layers, settings.tokenizer_id
        );
        Ok(Self::new(model, tokenizer, device))
    }

    pub fn predict(&self, question: &str, context: &str) -> Result<String, QaError> {
        let encoding = self.tokenizer
            .encode((question, context), true)
            .map_err(|e| QaError::Inference(format!("Tokenise: {e}")))?;

        let input_ids = encoding.get_ids();
        if input_ids.is_empty() {
            return Ok(String::new());
        }

        let (start_scores, end_scores) = self
            .span_scores(input_ids, encoding.get_attention_mask())
            .map_err(|e| QaError::Inference(format!("{e:#}")))?;

        let answer = decode_span(&self.tokenizer, input_ids, &start_scores, &end_scores)?;
        tracing::debug!("Answer span decoded to '{}'", answer);
        Ok(answer)
    }

    fn span_scores(&self, input_ids: &[u32], attention_mask: &[u32]) -> anyhow::Result<(Vec<f32>, Vec<f32>)> {
        let seq_len = input_ids.len();
        let to_tensor = |values: &[u32]| {
            let data: Vec<i64> = values.iter().map(|&v| v as i64).collect();
            Tensor::<InferBackend, 2, Int>::from_data(TensorData::new(data, [1, seq_len]), &self.device)
        };

        let output = self.model.lock().forward(to_tensor(input_ids), to_tensor(attention_mask));

        let start = output.start_logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .context("Reading start logits")?;
        let end = output.end_logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .context("Reading end logits")?;
        Ok((start, end))
    }
}

impl SpanReader for Inferencer {
    fn read_span(&self, question: &str, context: &str) -> Result<String, QaError> {
        self.predict(question, context)
    }
}

/// Index of the largest score; the first one wins ties.
pub fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

/// Decode `input_ids[argmax(start)..=argmax(end)]`, skipping
/// special tokens. An inverted span yields an empty string.
pub fn decode_span(
    tokenizer:    &Tokenizer,
    input_ids:    &[u32],
    start_scores: &[f32],
    end_scores:   &[f32],
) -> Result<String, QaError> {
    let start = argmax(start_scores);
    let end   = argmax(end_scores);

    if end < start || start >= input_ids.len() {
        tracing::debug!("Empty span: start={} end={}", start, end);
        return Ok(String::new());
    }
    let end = end.min(input_ids.len() - 1);

    tokenizer
        .decode(&input_ids[start..=end], true)
        .map_err(|e| QaError::Inference(format!("Decode: {e}")))
}

// ─── LazyInferencer ───────────────────────────────────────────────────────────
/// Loads the Inferencer on first use and reuses it afterwards.
///
/// Concurrent first callers block on the single initializer. A
/// failed load is not cached: the next call tries again.
pub struct LazyInferencer {
    settings: ModelSettings,
    cell:     OnceCell<Inferencer>,
}

impl LazyInferencer {
    pub fn new(settings: ModelSettings) -> Self {
        Self { settings, cell: OnceCell::new() }
    }

    pub fn get(&self) -> Result<&Inferencer, QaError> {
        self.cell.get_or_try_init(|| {
            tracing::info!("Loading QA model '{}'", self.settings.model_id);
            Inferencer::load(&self.settings)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl SpanReader for LazyInferencer {
    fn read_span(&self, question: &str, context: &str) -> Result<String, QaError> {
        self.get()?.predict(question, context)
    }
}
