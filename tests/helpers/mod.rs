//! Test helper utilities for E2E testing against a running server.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Response from POST /api/v1/classify
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub genres: Vec<GenreLabel>,
    pub confidence: f64,
    pub raw_response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenreLabel {
    pub label: String,
    pub similarity: f64,
}

/// Response from GET /api/v1/shuffle
#[derive(Debug, Serialize, Deserialize)]
pub struct ShuffleOutcome {
    pub title: String,
    pub catalog_genres: Vec<String>,
    pub prediction: ClassificationResult,
    pub overlap: Vec<String>,
    pub matches_catalog: bool,
}

/// Error body returned by the API on any failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Submit a description to the classify endpoint.
pub async fn classify(
    client: &reqwest::Client,
    base_url: &str,
    description: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    client
        .post(format!("{}/api/v1/classify", base_url))
        .json(&serde_json::json!({ "description": description }))
        .send()
        .await
}
