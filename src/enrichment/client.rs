//! HTTP client for the generative-text backend.
//!
//! The enricher is deliberately decoupled from any specific remote protocol:
//! everything upstream of `TextGenerate` only sees "prompt in, text out".
//! The concrete client here speaks the local-inference `/api/generate`
//! convention (model + prompt + system, non-streaming).

use serde::{Deserialize, Serialize};

use super::EnrichmentError;

/// Pluggable generative backend — the seam the enricher is tested through.
pub trait TextGenerate {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, EnrichmentError>;
}

/// Blocking HTTP client for a local generative service.
pub struct GenerativeClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GenerativeClient {
    /// Create a client for `base_url`, generating with `model`.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, EnrichmentError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EnrichmentError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Default local instance at localhost:11434 with a 2-minute timeout.
    pub fn default_local(model: &str) -> Result<Self, EnrichmentError> {
        Self::new("http://localhost:11434", model, 120)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl TextGenerate for GenerativeClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, EnrichmentError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                EnrichmentError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                EnrichmentError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                EnrichmentError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EnrichmentError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}
