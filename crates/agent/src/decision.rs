//! Parsing model output into a structured tool decision.
//!
//! The decision round trip asks the model to reply with a single JSON
//! object. Model output is free text, so parsing is an explicit fallible
//! step; callers map failure to [`ToolDecision::NoTool`] rather than
//! surfacing it.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Outcome of a tool-selection round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolDecision {
    /// No tool applies; answer from the message alone.
    NoTool,
    /// The model selected a tool. The name is not validated against the
    /// registry here; resolution happens at execution time.
    UseTool {
        name: String,
        arguments: Map<String, Value>,
    },
}

impl ToolDecision {
    /// Name of the selected tool, if any.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Self::NoTool => None,
            Self::UseTool { name, .. } => Some(name),
        }
    }
}

/// A decision reply that could not be understood.
#[derive(Debug, Error)]
#[error("malformed decision reply: {0}")]
pub struct DecisionParseError(#[from] serde_json::Error);

#[derive(Deserialize)]
struct RawDecision {
    tool: Option<String>,
    #[serde(default)]
    arguments: Map<String, Value>,
}

/// Parse a raw decision reply.
///
/// Accepts exactly the shape the decision prompt demands: an object with a
/// `tool` key (string or null) and an optional `arguments` object. A
/// missing, null, or empty `tool` parses as [`ToolDecision::NoTool`];
/// anything that is not that shape is an error for the caller to handle.
pub fn parse_decision(raw: &str) -> Result<ToolDecision, DecisionParseError> {
    let raw: RawDecision = serde_json::from_str(raw.trim())?;
    Ok(match raw.tool {
        Some(name) if !name.is_empty() => ToolDecision::UseTool {
            name,
            arguments: raw.arguments,
        },
        _ => ToolDecision::NoTool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tool_selection() {
        let decision =
            parse_decision(r#"{"tool":"weather","arguments":{"city":"Paris"}}"#).unwrap();
        assert_eq!(
            decision,
            ToolDecision::UseTool {
                name: "weather".into(),
                arguments: json!({"city":"Paris"}).as_object().unwrap().clone(),
            }
        );
    }

    #[test]
    fn null_tool_is_no_tool() {
        let decision = parse_decision(r#"{"tool":null,"arguments":{}}"#).unwrap();
        assert_eq!(decision, ToolDecision::NoTool);
    }

    #[test]
    fn missing_keys_default() {
        // No `arguments` key: empty map. No `tool` key: no tool.
        let decision = parse_decision(r#"{"tool":"weather"}"#).unwrap();
        assert_eq!(decision.tool_name(), Some("weather"));
        assert_eq!(parse_decision("{}").unwrap(), ToolDecision::NoTool);
    }

    #[test]
    fn empty_tool_name_is_no_tool() {
        let decision = parse_decision(r#"{"tool":"","arguments":{}}"#).unwrap();
        assert_eq!(decision, ToolDecision::NoTool);
    }

    #[test]
    fn free_text_is_an_error() {
        assert!(parse_decision("not json at all").is_err());
    }

    #[test]
    fn wrong_shapes_are_errors() {
        assert!(parse_decision("[]").is_err());
        assert!(parse_decision(r#""weather""#).is_err());
        assert!(parse_decision(r#"{"tool":42,"arguments":{}}"#).is_err());
        assert!(parse_decision(r#"{"tool":"weather","arguments":[1,2]}"#).is_err());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let decision = parse_decision("  {\"tool\":null,\"arguments\":{}}\n").unwrap();
        assert_eq!(decision, ToolDecision::NoTool);
    }
}
