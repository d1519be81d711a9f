// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the pretrained WordPiece tokenizer that matches the QA
// model's vocabulary. The tokenizer.json published with the
// model already carries the BERT normalizer and the
// [CLS] A [SEP] B [SEP] post-processor, so encoding a
// (question, passage) pair needs no manual id assembly.
//
// `build_word_level` writes a small tokenizer JSON in the same
// Hugging Face format by hand; tests use it to exercise span
// decoding without touching the network.

use anyhow::Result;
use tokenizers::Tokenizer;

use crate::infra::hub::HubFetcher;

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore<'a> {
    hub: &'a HubFetcher,
}

impl<'a> TokenizerStore<'a> {
    pub fn new(hub: &'a HubFetcher) -> Self {
        Self { hub }
    }

    /// Load the tokenizer published in hub repository `repo_id`
    pub fn load(&self, repo_id: &str) -> Result<Tokenizer> {
        let path = self.hub.fetch(repo_id, TOKENIZER_FILE)?;
        tracing::info!("Loading tokenizer from '{}'", path.display());
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }
}

/// Build a lower-casing word-level tokenizer over `words` with
/// BERT special tokens and BERT pair post-processing.
#[cfg(test)]
pub fn build_word_level(words: &[&str]) -> Result<Tokenizer> {
    use std::str::FromStr;

    // Special tokens get fixed IDs matching BERT convention
    let mut vocab = serde_json::json!({
        "[PAD]":  0,
        "[UNK]":  1,
        "[CLS]":  101,
        "[SEP]":  102,
        "[MASK]": 103,
    });

    let mut next_id = 104usize;
    for word in words {
        if vocab.get(*word).is_none() {
            vocab[*word] = serde_json::json!(next_id);
            next_id += 1;
        }
    }

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0,   "content": "[PAD]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 1,   "content": "[UNK]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 101, "content": "[CLS]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 102, "content": "[SEP]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 103, "content": "[MASK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": true,
            "strip_accents": null,
            "lowercase": true
        },
        "pre_tokenizer": {
            "type": "Whitespace"
        },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 102],
            "cls": ["[CLS]", 101]
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });

    Tokenizer::from_str(&tokenizer_json.to_string())
        .map_err(|e| anyhow::anyhow!("Cannot build tokenizer: {e}"))
}
