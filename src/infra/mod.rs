// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the network or the model cache:
//
//   wikipedia.rs      : KnowledgeSource over the MediaWiki API
//                        (search titles, fetch intro summaries)
//
//   hub.rs            : Hugging Face Hub downloads, cached on
//                        disk between runs
//
//   tokenizer_store.rs: Loads the pretrained tokenizer.json
//
//   checkpoint.rs     : Loads config.json and the PyTorch
//                        weights into the burn QA model
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §6 (Importing Models)

/// MediaWiki search + summary client
pub mod wikipedia;

/// Hugging Face Hub file fetcher
pub mod hub;

/// Pretrained tokenizer loading
pub mod tokenizer_store;

/// Pretrained weight loading
pub mod checkpoint;
