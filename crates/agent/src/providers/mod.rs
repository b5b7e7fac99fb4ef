//! LLM backend adapters.
//!
//! Each provider implements the backend trait for its specific wire
//! format. Adapters only translate requests and extract reply text; all
//! prompt content comes from the caller, and every request is sent with
//! temperature 0 so decisions and answers are as reproducible as the
//! provider allows.

mod gemini;
mod ollama;
mod openai;

pub use gemini::{GeminiBackend, GeminiBackendBuilder};
pub use ollama::{OllamaBackend, OllamaBackendBuilder};
pub use openai::{OpenAiBackend, OpenAiBackendBuilder};

pub(crate) use openai::{GROQ_BASE_URL, GROQ_DEFAULT_MODEL};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Trait for LLM backends.
///
/// Both operations send a system instruction and a user prompt over one
/// network round trip and return the reply text. A reply with no text
/// field resolves to an empty string, never an error; transport failures
/// and non-success statuses are errors.
pub trait Backend: Send + Sync {
    /// Run a tool-selection round trip.
    fn decide(&self, system: &str, prompt: &str) -> impl Future<Output = Result<String>> + Send;

    /// Run an answer round trip.
    fn answer(&self, system: &str, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Supported provider families.
///
/// Groq speaks the OpenAI chat-completions wire format and is served by
/// [`OpenAiBackend`] with a different base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Ollama,
    OpenAi,
    Groq,
    Gemini,
}

/// A backend selected at runtime from configuration.
///
/// Wraps the concrete adapters so a provider can be chosen by value while
/// [`crate::Agent`] stays generic over [`Backend`].
#[derive(Debug)]
pub enum AnyBackend {
    Ollama(OllamaBackend),
    OpenAi(OpenAiBackend),
    Gemini(GeminiBackend),
}

impl Backend for AnyBackend {
    async fn decide(&self, system: &str, prompt: &str) -> Result<String> {
        match self {
            Self::Ollama(backend) => backend.decide(system, prompt).await,
            Self::OpenAi(backend) => backend.decide(system, prompt).await,
            Self::Gemini(backend) => backend.decide(system, prompt).await,
        }
    }

    async fn answer(&self, system: &str, prompt: &str) -> Result<String> {
        match self {
            Self::Ollama(backend) => backend.answer(system, prompt).await,
            Self::OpenAi(backend) => backend.answer(system, prompt).await,
            Self::Gemini(backend) => backend.answer(system, prompt).await,
        }
    }
}

impl std::fmt::Display for AnyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama(backend) => backend.fmt(f),
            Self::OpenAi(backend) => backend.fmt(f),
            Self::Gemini(backend) => backend.fmt(f),
        }
    }
}
