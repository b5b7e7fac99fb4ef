//! Ollama local-model backend.
//!
//! Single-endpoint POST to `/api/generate` with the system instruction and
//! prompt as top-level fields, non-streaming.

use super::Backend;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2:latest";

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    response: String,
}

/// Builder for creating an Ollama backend.
#[derive(Debug, Clone)]
pub struct OllamaBackendBuilder {
    model: String,
    base_url: String,
}

impl OllamaBackendBuilder {
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the server base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the backend.
    pub fn build(self) -> OllamaBackend {
        OllamaBackend {
            client: reqwest::Client::new(),
            model: self.model,
            base_url: self.base_url,
        }
    }
}

impl Default for OllamaBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend for a local Ollama server.
#[derive(Debug)]
pub struct OllamaBackend {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OllamaBackend {
    /// Create a builder with default model and base URL.
    pub fn builder() -> OllamaBackendBuilder {
        OllamaBackendBuilder::new()
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ApiRequest {
            model: &self.model,
            system,
            prompt,
            stream: false,
            options: Options { temperature: 0.0 },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(api_response.response)
    }
}

impl std::fmt::Display for OllamaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ollama({})", self.model)
    }
}

impl Backend for OllamaBackend {
    async fn decide(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate(system, prompt).await
    }

    async fn answer(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate(system, prompt).await
    }
}
