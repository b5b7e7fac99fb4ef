//! Configuration loading from TOML.

use crate::providers::{AnyBackend, GeminiBackend, OllamaBackend, OpenAiBackend, Provider};
use crate::{Agent, AgentBuilder, ArgumentPolicy, ToolRegistry};
use serde::Deserialize;
use std::path::Path;

const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
const GROQ_KEY_VAR: &str = "GROQ_API_KEY";
const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Backend provider configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Agent behavior options.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Backend provider configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Provider to use.
    #[serde(default = "default_provider")]
    pub provider: Provider,

    /// Model identifier; defaulted per provider when omitted.
    pub model: Option<String>,

    /// API base URL; defaulted per provider when omitted.
    pub base_url: Option<String>,

    /// Credential for hosted providers. Falls back to the provider's
    /// environment variable when omitted.
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            base_url: None,
            api_key: None,
        }
    }
}

fn default_provider() -> Provider {
    Provider::Ollama
}

/// Agent behavior options.
#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Whether answer prompts carry the grounding rules.
    #[serde(default = "default_grounding")]
    pub grounding: bool,

    /// Whether decided arguments are checked against declared parameters
    /// before a tool is invoked.
    #[serde(default)]
    pub strict_arguments: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            grounding: default_grounding(),
            strict_arguments: false,
        }
    }
}

fn default_grounding() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("api key not configured: set backend.api_key or {0}")]
    MissingApiKey(&'static str),
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn api_key(&self, env_var: &'static str) -> Result<String, ConfigError> {
        match &self.backend.api_key {
            Some(key) => Ok(key.clone()),
            None => std::env::var(env_var).map_err(|_| ConfigError::MissingApiKey(env_var)),
        }
    }

    /// Build the configured backend.
    pub fn build_backend(&self) -> Result<AnyBackend, ConfigError> {
        let model = self.backend.model.as_deref();
        let base_url = self.backend.base_url.as_deref();

        Ok(match self.backend.provider {
            Provider::Ollama => {
                let mut builder = OllamaBackend::builder();
                if let Some(model) = model {
                    builder = builder.model(model);
                }
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                AnyBackend::Ollama(builder.build())
            }
            Provider::OpenAi => {
                let mut builder = OpenAiBackend::builder(self.api_key(OPENAI_KEY_VAR)?);
                if let Some(model) = model {
                    builder = builder.model(model);
                }
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                AnyBackend::OpenAi(builder.build())
            }
            Provider::Groq => {
                let mut builder = OpenAiBackend::builder(self.api_key(GROQ_KEY_VAR)?)
                    .base_url(crate::providers::GROQ_BASE_URL)
                    .model(crate::providers::GROQ_DEFAULT_MODEL);
                if let Some(model) = model {
                    builder = builder.model(model);
                }
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                AnyBackend::OpenAi(builder.build())
            }
            Provider::Gemini => {
                let mut builder = GeminiBackend::builder(self.api_key(GEMINI_KEY_VAR)?);
                if let Some(model) = model {
                    builder = builder.model(model);
                }
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                AnyBackend::Gemini(builder.build())
            }
        })
    }

    /// Build an agent from this configuration and a tool registry.
    pub fn build_agent(&self, tools: ToolRegistry) -> Result<Agent<AnyBackend>, ConfigError> {
        let backend = self.build_backend()?;
        let argument_policy = if self.agent.strict_arguments {
            ArgumentPolicy::Strict
        } else {
            ArgumentPolicy::Trusting
        };

        Ok(AgentBuilder::new(backend)
            .tools(tools)
            .grounding(self.agent.grounding)
            .argument_policy(argument_policy)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_ollama() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend.provider, Provider::Ollama);
        assert!(config.agent.grounding);
        assert!(!config.agent.strict_arguments);
        assert!(matches!(config.build_backend().unwrap(), AnyBackend::Ollama(_)));
    }

    #[test]
    fn parses_a_full_config() {
        let config = Config::parse(
            r#"
            [backend]
            provider = "openai"
            model = "gpt-4o-mini"
            api_key = "sk-test"

            [agent]
            grounding = false
            strict_arguments = true
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.provider, Provider::OpenAi);
        assert!(!config.agent.grounding);
        assert!(config.agent.strict_arguments);
        assert!(matches!(config.build_backend().unwrap(), AnyBackend::OpenAi(_)));
    }

    #[test]
    fn groq_uses_the_openai_wire_format() {
        let config = Config::parse(
            r#"
            [backend]
            provider = "groq"
            api_key = "gsk-test"
            "#,
        )
        .unwrap();

        let backend = config.build_backend().unwrap();
        assert!(matches!(backend, AnyBackend::OpenAi(_)));
    }

    #[test]
    fn env_credential_is_used_when_config_omits_the_key() {
        unsafe { std::env::set_var(GROQ_KEY_VAR, "gsk-from-env") };
        let config = Config::parse("[backend]\nprovider = \"groq\"").unwrap();
        assert!(matches!(config.build_backend().unwrap(), AnyBackend::OpenAi(_)));
    }

    #[test]
    fn config_errors_convert_to_crate_errors() {
        unsafe { std::env::remove_var(GEMINI_KEY_VAR) };
        let config = Config::parse("[backend]\nprovider = \"gemini\"").unwrap();
        let err: crate::Error = config.build_backend().unwrap_err().into();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        // No api_key in config and none in the environment.
        unsafe { std::env::remove_var(GEMINI_KEY_VAR) };
        let config = Config::parse("[backend]\nprovider = \"gemini\"").unwrap();
        let err = config.build_backend().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(GEMINI_KEY_VAR)));
    }

    #[test]
    fn unknown_provider_fails_to_parse() {
        assert!(Config::parse("[backend]\nprovider = \"bedrock\"").is_err());
    }
}
