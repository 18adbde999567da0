pub mod classify;
pub mod health;
pub mod metrics;
pub mod stats;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::app_state::AppState;
use crate::services::llm::InferenceError;

/// Build the application router: the embedded UI page plus every API
/// endpoint. The metrics scrape route is attached separately since it
/// carries its own state.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Static UI (embedded at compile time)
        .route("/", get(|| async { Html(include_str!("../../static/index.html")) }))
        // API endpoints
        .route("/health", get(health::health_check))
        .route("/api/v1/classify", post(classify::classify))
        .route("/api/v1/shuffle", get(classify::shuffle))
        .route("/api/v1/stats/genres", get(stats::top_genres))
        .route("/api/v1/stats/releases", get(stats::releases))
        .route("/api/v1/stats/births", get(stats::births))
        .route("/api/v1/stats/actor-counts", get(stats::actor_counts))
        .route("/api/v1/stats/heights", get(stats::heights))
        .with_state(state)
}

/// Error surface of the HTTP API. Every failure becomes a JSON body with a
/// human-readable message; inference failures are shown to the user as-is
/// with no retry.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Client-side input problems caught inside the classifier
            ApiError::Inference(InferenceError::EmptyInput)
            | ApiError::Inference(InferenceError::InputTooLong { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Inference(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
