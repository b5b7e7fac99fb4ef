//! Parley agent core — tool-augmented question answering over
//! interchangeable LLM backends.
//!
//! This crate is the orchestration core of an embeddable assistant: it
//! takes one user message, asks a language model whether any registered
//! tool applies, runs the selected tool, and composes a final answer with
//! the tool result as context. Presentation (chat window, rendering,
//! transcript state) belongs to the host.
//!
//! # Overview
//!
//! The crate is organized around these concepts:
//!
//! - **Agent**: the façade; `ask(message)` runs the two-phase
//!   decide-then-answer flow. Stateless across calls.
//! - **Backend**: a trait abstracting provider wire formats (Ollama,
//!   OpenAI-compatible, Gemini), selected by configuration.
//! - **Tool / ToolRegistry**: host-supplied callables with declared
//!   parameter schemas; the model picks among them by name.
//!
//! Model output is untrusted: a decision reply that is not valid JSON, or
//! that names an unknown tool, silently degrades to an answer without
//! tool context. Transport failures and tool-handler failures propagate
//! to the caller.
//!
//! # Example
//!
//! ```ignore
//! use agent::{Agent, OpenAiBackend, ParamSpec, ParamType, Tool};
//!
//! # async fn example() -> agent::Result<()> {
//! let weather = Tool::new("weather", "Get the current weather for a city", |args| {
//!     Box::pin(async move {
//!         // call out to a weather service with `args`
//!         Ok(serde_json::json!({"temp_c": 21}))
//!     })
//! })
//! .param("city", ParamSpec::required(ParamType::String));
//!
//! let backend = OpenAiBackend::builder("sk-...").build();
//! let agent = Agent::builder(backend).tool(weather).build();
//!
//! let answer = agent.ask("What's the weather in Paris?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

mod agent;
mod config;
mod decision;
mod error;
mod message;
pub mod prompt;
mod providers;
pub mod tools;

// Agent façade
pub use agent::{Agent, AgentBuilder, ArgumentPolicy};

// Configuration
pub use config::{AgentConfig, BackendConfig, Config, ConfigError};

// Tool decisions
pub use decision::{DecisionParseError, ToolDecision, parse_decision};

// Error types
pub use error::{Error, Result};

// Host-side transcript types
pub use message::{Message, Role};

// Backends
pub use providers::{
    AnyBackend, Backend, GeminiBackend, GeminiBackendBuilder, OllamaBackend,
    OllamaBackendBuilder, OpenAiBackend, OpenAiBackendBuilder, Provider,
};

// Tools
pub use tools::{ParamSpec, ParamType, Tool, ToolError, ToolRegistry};
