// ============================================================
// Layer 6 — Pretrained Weight Store
// ============================================================
// Restores the QA model from a Hugging Face checkpoint:
//
//   config.json        → DistilBertQaConfig (architecture)
//   pytorch_model.bin  → DistilBertQaRecord (weights)
//
// The PyTorch recorder transposes Linear weights and maps
// LayerNorm weight/bias onto burn's gamma/beta; the remaining
// differences are key names, fixed with regex remaps below.
//
// Reference: Burn Book §6 (Importing PyTorch Models)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, Recorder},
};
use burn_import::pytorch::{LoadArgs, PyTorchFileRecorder};
use std::fs;

use crate::infra::hub::HubFetcher;
use crate::ml::model::{DistilBertQa, DistilBertQaConfig, DistilBertQaRecord};

const CONFIG_FILE:  &str = "config.json";
const WEIGHTS_FILE: &str = "pytorch_model.bin";

/// Applied in order to every checkpoint key.
const KEY_REMAPS: [(&str, &str); 3] = [
    (r"^distilbert\.",           ""),
    (r"LayerNorm",               "layer_norm"),
    (r"^transformer\.layer\.",   "layers."),
];

pub struct WeightStore<'a> {
    hub:      &'a HubFetcher,
    model_id: String,
}

impl<'a> WeightStore<'a> {
    pub fn new(hub: &'a HubFetcher, model_id: impl Into<String>) -> Self {
        Self { hub, model_id: model_id.into() }
    }

    pub fn load_config(&self) -> Result<DistilBertQaConfig> {
        let path = self.hub.fetch(&self.model_id, CONFIG_FILE)?;
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a DistilBERT config", path.display()))
    }

    /// Load the checkpoint weights into `model`, which must have
    /// been built from this store's config.
    pub fn load_model<B: Backend>(
        &self,
        model:  DistilBertQa<B>,
        device: &B::Device,
    ) -> Result<DistilBertQa<B>> {
        let path = self.hub.fetch(&self.model_id, WEIGHTS_FILE)?;
        tracing::info!("Loading weights from '{}'", path.display());

        let args = KEY_REMAPS
            .iter()
            .fold(LoadArgs::new(path.clone()), |args, (from, to)| args.with_key_remap(from, to));

        let record: DistilBertQaRecord<B> = PyTorchFileRecorder::<FullPrecisionSettings>::default()
            .load(args, device)
            .with_context(|| format!("Cannot load weights '{}'", path.display()))?;

        Ok(model.load_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn remap(key: &str) -> String {
        KEY_REMAPS.iter().fold(key.to_string(), |k, (from, to)| {
            Regex::new(from).unwrap().replace(&k, *to).into_owned()
        })
    }

    #[test]
    fn test_checkpoint_keys_map_onto_module_paths() {
        assert_eq!(
            remap("distilbert.embeddings.word_embeddings.weight"),
            "embeddings.word_embeddings.weight"
        );
        assert_eq!(
            remap("distilbert.embeddings.LayerNorm.bias"),
            "embeddings.layer_norm.bias"
        );
        assert_eq!(
            remap("distilbert.transformer.layer.5.attention.q_lin.weight"),
            "layers.5.attention.q_lin.weight"
        );
        assert_eq!(
            remap("distilbert.transformer.layer.0.output_layer_norm.weight"),
            "layers.0.output_layer_norm.weight"
        );
        assert_eq!(remap("qa_outputs.bias"), "qa_outputs.bias");
    }

    #[test]
    fn test_hf_config_deserializes() {
        let json = r#"{
            "activation": "gelu",
            "architectures": ["DistilBertForQuestionAnswering"],
            "dim": 768,
            "dropout": 0.1,
            "hidden_dim": 3072,
            "max_position_embeddings": 512,
            "model_type": "distilbert",
            "n_heads": 12,
            "n_layers": 6,
            "vocab_size": 30522
        }"#;
        let cfg: DistilBertQaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.dim, 768);
        assert_eq!(cfg.n_layers, 6);
        assert_eq!(cfg.max_position_embeddings, 512);
        assert_eq!(cfg.layer_norm_eps, 1e-12);
    }
}
