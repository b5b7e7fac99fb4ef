//! Tool-related types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

/// Declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
}

impl ParamType {
    /// Name used when rendering the parameter into a prompt.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether a JSON value matches this declared type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// Declared shape of one tool parameter.
///
/// Parameters are optional unless marked required.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub param_type: ParamType,
    pub description: Option<String>,
    pub required: bool,
}

impl ParamSpec {
    /// An optional parameter of the given type.
    pub fn optional(param_type: ParamType) -> Self {
        Self {
            param_type,
            description: None,
            required: false,
        }
    }

    /// A required parameter of the given type.
    pub fn required(param_type: ParamType) -> Self {
        Self {
            param_type,
            description: None,
            required: true,
        }
    }

    /// Attach a human-readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Boxed future returned by tool handlers.
pub type ToolFuture = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>>;

type Handler = Box<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// A named, host-supplied callable capability.
///
/// The core only reads the declared schema (for prompt rendering) and
/// invokes the handler with whatever arguments the model decided on.
pub struct Tool {
    name: String,
    description: String,
    parameters: Vec<(String, ParamSpec)>,
    handler: Handler,
}

impl Tool {
    /// Create a tool with a name, description, and async handler.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl Fn(Value) -> ToolFuture + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Declare a parameter. Declaration order is preserved in prompts.
    pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.parameters.push((name.into(), spec));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[(String, ParamSpec)] {
        &self.parameters
    }

    /// Invoke the tool. Handler failures propagate to the caller.
    pub async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        (self.handler)(arguments).await
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
