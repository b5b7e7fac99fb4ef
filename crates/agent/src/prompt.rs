//! Prompt construction.
//!
//! Everything here is pure string building: the tool-selection
//! instruction, the tool-result context block, and the final answer
//! prompt. The same strings are sent to every backend, so adapters carry
//! no prompt knowledge of their own.

use crate::tools::ToolRegistry;
use std::fmt::Write;

/// System directive for answer round trips.
pub const MARKDOWN_SYSTEM_PROMPT: &str = "\
You are a helpful AI assistant.

Formatting rules:
- Always respond in Markdown
- Use bullet lists for multiple items
- Use **bold** for important values
- Use tables when comparing data
- Use `inline code` for variables or keys
- Use code blocks only when necessary
- Keep responses clean and readable";

/// System directive for decision round trips.
pub const DECISION_SYSTEM_PROMPT: &str =
    "You select tools and arguments. Respond ONLY with valid JSON.";

/// Literal the model must return when grounding is on and the context
/// cannot answer the question.
pub const NO_INFORMATION_REPLY: &str = "No relevant information was found.";

/// Hard cutoff, in characters, applied to a serialized tool result before
/// it is embedded as context. Truncation is not semantic summarization:
/// anything past the bound is lost.
pub const MAX_CONTEXT_CHARS: usize = 4000;

/// Render the tool-selection instruction for a registry and user message.
pub fn build_decision_prompt(tools: &ToolRegistry, message: &str) -> String {
    let mut out = String::from(
        "You are a tool-selection engine.\n\n\
         Your job is to decide whether a tool should be called and extract arguments.\n\n\
         Available tools:\n",
    );

    for tool in tools.iter() {
        let _ = write!(
            out,
            "\nTool name: {}\nDescription: {}\nParameters:\n",
            tool.name(),
            tool.description()
        );
        for (name, spec) in tool.parameters() {
            let requirement = if spec.required { "required" } else { "optional" };
            let _ = write!(out, "- {}: {} ({})", name, spec.param_type.as_str(), requirement);
            if let Some(description) = &spec.description {
                let _ = write!(out, " - {description}");
            }
            out.push('\n');
        }
    }

    let _ = write!(
        out,
        "\nUser request:\n{message}\n\n\
         STRICT OUTPUT RULES:\n\
         - Respond with ONLY a single valid JSON object\n\
         - The object MUST have exactly two top-level properties:\n\
         \x20 - \"tool\": string | null\n\
         \x20 - \"arguments\": object\n\
         - Do NOT include any other keys\n\
         - Do NOT include explanations, comments, or markdown\n\
         - If no tool applies, return:\n\
         \x20 {{ \"tool\": null, \"arguments\": {{}} }}\n\
         - If a tool applies:\n\
         \x20 - \"tool\" must be the exact tool name\n\
         \x20 - \"arguments\" must include ONLY parameters required by the request\n\n\
         Return ONLY valid JSON."
    );

    out
}

/// Render a tool result as a context block, truncated to
/// [`MAX_CONTEXT_CHARS`].
pub fn render_tool_context(tool_name: &str, result: &serde_json::Value) -> String {
    let json = serde_json::to_string_pretty(result).unwrap_or_default();
    let json = truncate_chars(&json, MAX_CONTEXT_CHARS);
    format!("Tool used: {tool_name}\nResult (partial):\n```json\n{json}\n```")
}

/// Build the final answer prompt from the user message, the optional tool
/// context, and the fixed formatting rules. Pure construction: identical
/// inputs yield an identical prompt.
pub fn build_answer_prompt(message: &str, tool_context: Option<&str>, grounding: bool) -> String {
    let mut out = format!("User request:\n{message}\n");

    if let Some(context) = tool_context {
        let _ = write!(out, "\n{context}\n");
    }

    out.push_str(
        "\nRespond in clean, well-formatted Markdown.\n\
         Use lists, tables, and headings where appropriate.\n\
         Do NOT mention tools or APIs explicitly.\n",
    );

    if grounding {
        let _ = write!(
            out,
            "\nContext rules:\n\
             - Respond ONLY using the information provided in the context.\n\
             - Do NOT generate or assume any information not present in the context.\n\
             - If the answer cannot be found in the context, respond exactly: \"{NO_INFORMATION_REPLY}\"\n"
        );
    }

    out
}

/// Cut a string to at most `max` characters, on a char boundary.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ParamSpec, ParamType, Tool, ToolRegistry};
    use serde_json::{Value, json};

    fn weather_registry() -> ToolRegistry {
        ToolRegistry::new().with(
            Tool::new("weather", "Get the current weather for a city", |_| {
                Box::pin(async { Ok(Value::Null) })
            })
            .param("city", ParamSpec::required(ParamType::String))
            .param("units", ParamSpec::optional(ParamType::String).describe("metric or imperial")),
        )
    }

    #[test]
    fn decision_prompt_lists_tools_and_parameters() {
        let prompt = build_decision_prompt(&weather_registry(), "Weather in Paris?");
        assert!(prompt.contains("Tool name: weather"));
        assert!(prompt.contains("Description: Get the current weather for a city"));
        assert!(prompt.contains("- city: string (required)"));
        assert!(prompt.contains("- units: string (optional)"));
        assert!(prompt.contains("User request:\nWeather in Paris?"));
        assert!(prompt.contains("{ \"tool\": null, \"arguments\": {} }"));
    }

    #[test]
    fn answer_prompt_is_idempotent() {
        let context = render_tool_context("weather", &json!({"temp": 21}));
        let a = build_answer_prompt("Weather in Paris?", Some(&context), true);
        let b = build_answer_prompt("Weather in Paris?", Some(&context), true);
        assert_eq!(a, b);
    }

    #[test]
    fn answer_prompt_without_context_omits_tool_block() {
        let prompt = build_answer_prompt("What is 2+2?", None, false);
        assert!(!prompt.contains("Tool used:"));
        assert!(prompt.contains("User request:\nWhat is 2+2?"));
    }

    #[test]
    fn grounding_rules_follow_the_flag() {
        let with = build_answer_prompt("q", None, true);
        let without = build_answer_prompt("q", None, false);
        assert!(with.contains(NO_INFORMATION_REPLY));
        assert!(with.contains("Respond ONLY using the information provided in the context."));
        assert!(!without.contains("Context rules:"));
    }

    #[test]
    fn oversized_result_is_cut_to_the_bound() {
        let result = json!("x".repeat(5000));
        let context = render_tool_context("big", &result);
        let body = context
            .split("```json\n")
            .nth(1)
            .unwrap()
            .strip_suffix("\n```")
            .unwrap();
        assert_eq!(body.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Serialized form is 4502 chars of multibyte content; slicing by
        // bytes would panic mid-codepoint.
        let result = json!("é".repeat(4500));
        let context = render_tool_context("accents", &result);
        let body = context
            .split("```json\n")
            .nth(1)
            .unwrap()
            .strip_suffix("\n```")
            .unwrap();
        assert_eq!(body.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn short_results_are_kept_whole() {
        let context = render_tool_context("weather", &json!({"temp": 21}));
        assert!(context.contains("Tool used: weather"));
        assert!(context.contains("\"temp\": 21"));
        assert!(context.ends_with("```"));
    }
}
