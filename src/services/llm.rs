use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Abstract model capability: a prompt goes in, completion text comes out.
///
/// Route handlers and the classification service depend only on this trait,
/// so the underlying provider can be swapped without touching presentation
/// logic.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Cheap reachability probe for health checks. Backends without a
    /// dedicated probe report healthy.
    async fn ping(&self) -> Result<(), InferenceError> {
        Ok(())
    }
}

/// Client for a local Ollama server.
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a client for the given Ollama base URL and model name.
    ///
    /// Local models can be slow on first load, hence the generous timeout.
    pub fn new(base_url: &str, model: &str) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(InferenceError::Http)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    /// Send a prompt to `/api/generate` (non-streaming) and return the
    /// completion text.
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.base_url);

        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(InferenceError::Http)?;

        if !response.status().is_success() {
            return Err(InferenceError::Api {
                status: response.status().as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await.map_err(InferenceError::Http)?;

        if body.response.trim().is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        Ok(body.response)
    }

    /// Probe `/api/tags`, the cheapest endpoint the Ollama server exposes.
    async fn ping(&self) -> Result<(), InferenceError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.http.get(&url).send().await.map_err(InferenceError::Http)?;
        if !response.status().is_success() {
            return Err(InferenceError::Api {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("HTTP request to model backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model backend returned status {status}")]
    Api { status: u16 },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Input is {length} characters, exceeding the limit of {limit}")]
    InputTooLong { length: usize, limit: usize },

    #[error("Input description is empty")]
    EmptyInput,
}
