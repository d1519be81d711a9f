// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that describe one question's
// trip through the pipeline:
//
//   query → keywords → candidates → ranked passages → answers
//
// Rules for this layer:
//   - NO burn, axum or reqwest types
//   - NO file I/O or network calls
//   - Only plain structs, enums, traits and error types
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Retrieved encyclopedia passages and the candidate set
pub mod passage;

/// Answers and the typed pipeline outcome
pub mod answer;

/// Collaborator abstractions (knowledge source, span reader)
pub mod traits;

/// Error taxonomy shared by every layer
pub mod error;
