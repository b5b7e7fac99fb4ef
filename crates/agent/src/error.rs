use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error(transparent)]
    Tool(#[from] crate::tools::ToolError),
}

pub type Result<T> = std::result::Result<T, Error>;
