//! HTTP API
//!
//! Exposes the answer pipeline over two routes:
//!
//! - `GET /`: fixed greeting, usable as a liveness check.
//! - `GET /predict?search_string=<text>`: runs the pipeline and
//!   returns numbered answers, or a typed empty result, or a
//!   typed error with a matching status code.
//!
//! ## Submodules
//! - **`handlers`**: Axum request handlers and the router.
//! - **`types`**: Request/response DTOs.

pub mod handlers;
pub mod types;
