use axum::extract::State;
use axum::Json;
use garde::Validate;
use std::time::Instant;
use tracing::info;

use crate::app_state::AppState;
use crate::models::classification::{ClassificationRequest, ClassificationResult, ShuffleOutcome};
use crate::routes::ApiError;
use crate::services::classification::catalog_overlap;
use crate::services::llm::InferenceError;

/// Client-side rejections (empty or oversized input) never reach the model
/// backend, so they stay out of the backend failure counter.
fn is_backend_failure(err: &InferenceError) -> bool {
    !matches!(
        err,
        InferenceError::EmptyInput | InferenceError::InputTooLong { .. }
    )
}

fn record_backend_failure(err: &InferenceError) {
    if is_backend_failure(err) {
        metrics::counter!("classification_failures_total").increment(1);
    }
}

/// POST /api/v1/classify — classify a free-text movie description.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassificationRequest>,
) -> Result<Json<ClassificationResult>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    metrics::counter!("classification_requests_total").increment(1);
    let start = Instant::now();

    let result = state
        .classifier
        .classify(&*state.llm, &request.description)
        .await
        .inspect_err(record_backend_failure)?;

    metrics::histogram!("inference_seconds").record(start.elapsed().as_secs_f64());

    info!(
        genres = ?result.labels(),
        confidence = result.confidence,
        "Classified description"
    );

    Ok(Json(result))
}

/// GET /api/v1/shuffle — classify a random catalog movie and compare the
/// prediction against the genres the catalog records for it.
pub async fn shuffle(State(state): State<AppState>) -> Result<Json<ShuffleOutcome>, ApiError> {
    let movie = state
        .catalog
        .sample_with_summary()
        .ok_or_else(|| ApiError::NotFound("catalog has no movies with plot summaries".to_string()))?
        .clone();

    // sample_with_summary only returns movies that carry a summary
    let summary = movie.summary.as_deref().unwrap_or_default();

    metrics::counter!("shuffle_requests_total").increment(1);
    let start = Instant::now();

    let prediction = state
        .classifier
        .classify_movie(&*state.llm, &movie.name, summary, &movie.genres)
        .await
        .inspect_err(record_backend_failure)?;

    metrics::histogram!("inference_seconds").record(start.elapsed().as_secs_f64());

    let overlap = catalog_overlap(&prediction, &movie.genres);
    let matches_catalog = !overlap.is_empty();

    info!(
        title = %movie.name,
        matches_catalog,
        "Shuffle classification complete"
    );

    Ok(Json(ShuffleOutcome {
        title: movie.name,
        catalog_genres: movie.genres,
        prediction,
        overlap,
        matches_catalog,
    }))
}
