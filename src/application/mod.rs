// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to answer a question. No ML
// math, no HTTP, no printing here: only workflow coordination.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The question-answering workflow
pub mod answer_use_case;
