use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;
use crate::services::llm::InferenceBackend;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub catalog: ComponentHealth,
    pub model_backend: ComponentHealth,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// GET /health — component health with dependency status.
///
/// The catalog is loaded at startup, so its check is a size assertion; the
/// model backend check is a live reachability probe.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog_check = if state.catalog.movie_count() > 0 {
        ComponentHealth {
            status: "ok".to_string(),
            latency_ms: None,
            detail: Some(format!(
                "{} movies, {} characters",
                state.catalog.movie_count(),
                state.catalog.character_count()
            )),
        }
    } else {
        ComponentHealth {
            status: "error".to_string(),
            latency_ms: None,
            detail: Some("catalog is empty".to_string()),
        }
    };

    let model_start = std::time::Instant::now();
    let model_check = match state.llm.ping().await {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(model_start.elapsed().as_millis() as u64),
            detail: None,
        },
        Err(e) => ComponentHealth {
            status: "error".to_string(),
            latency_ms: None,
            detail: Some(e.to_string()),
        },
    };

    let all_healthy = catalog_check.status == "ok" && model_check.status == "ok";
    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if all_healthy {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            catalog: catalog_check,
            model_backend: model_check,
        },
    };

    (status_code, Json(response))
}
