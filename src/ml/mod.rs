// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// The network and the inference engine. Weight loading lives
// in infra/checkpoint.rs.
//
//   model.rs     : DistilBERT encoder + span head
//                   • token and position embeddings
//                   • multi-head self-attention with padding mask
//                   • GELU feed-forward networks
//                   • post-norm residual blocks
//                   • start / end logit projection
//
//   inferencer.rs: Inference engine
//                   Encodes (question, passage), runs the model,
//                   decodes the argmax span; LazyInferencer holds
//                   the single process-wide instance
//
// Reference: Burn Book §3 (Building Blocks)
//            Sanh et al. (2019) DistilBERT

/// DistilBERT question-answering architecture
pub mod model;

/// Span prediction and the lazily loaded shared model
pub mod inferencer;
