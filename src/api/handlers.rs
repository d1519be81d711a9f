use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json, Router, routing::get};
use serde_json::json;
use std::sync::Arc;

use super::types::{ErrorResponse, PredictParams, PredictResponse};
use crate::application::answer_use_case::AnswerUseCase;
use crate::domain::error::QaError;

pub fn router(use_case: Arc<AnswerUseCase>) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/predict", get(handle_predict))
        .layer(Extension(use_case))
}

pub async fn handle_root() -> Json<serde_json::Value> {
    Json(json!({ "Hello": "World" }))
}

pub async fn handle_predict(
    Query(params): Query<PredictParams>,
    Extension(use_case): Extension<Arc<AnswerUseCase>>,
) -> Response {
    match use_case.answer(&params.search_string).await {
        Ok(outcome) => {
            tracing::debug!("Outcome for '{}': {:?}", params.search_string, outcome.status());
            (StatusCode::OK, Json(PredictResponse::from(outcome))).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to answer '{}': {}", params.search_string, e);
            (status_for(&e), Json(ErrorResponse::from(&e))).into_response()
        }
    }
}

fn status_for(err: &QaError) -> StatusCode {
    match err {
        QaError::Upstream(_) => StatusCode::BAD_GATEWAY,
        QaError::Ranking(_) | QaError::ModelLoad(_) | QaError::Inference(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
