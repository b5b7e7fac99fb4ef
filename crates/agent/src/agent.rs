//! The agent façade.
//!
//! One `ask` call runs the two-phase flow: a decision round trip that may
//! select a tool, tool execution when one was selected, and an answer
//! round trip carrying the tool result as context. The agent holds no
//! mutable state, so a shared agent can serve concurrent `ask` calls;
//! each call's round trips are strictly sequential and attempted once.

use crate::decision::{ToolDecision, parse_decision};
use crate::prompt::{self, DECISION_SYSTEM_PROMPT, MARKDOWN_SYSTEM_PROMPT};
use crate::providers::Backend;
use crate::tools::{Tool, ToolRegistry};
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// How strictly decided arguments are checked before a tool is invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgumentPolicy {
    /// Pass the model's arguments through unchecked.
    #[default]
    Trusting,
    /// Check declared types and required parameters. A violation skips the
    /// tool and the answer proceeds without context, like a malformed
    /// decision.
    Strict,
}

/// Builder for creating an [`Agent`].
pub struct AgentBuilder<B> {
    backend: B,
    tools: ToolRegistry,
    grounding: bool,
    argument_policy: ArgumentPolicy,
}

impl<B: Backend> AgentBuilder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tools: ToolRegistry::new(),
            grounding: true,
            argument_policy: ArgumentPolicy::default(),
        }
    }

    /// Use the given registry.
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Register a single tool.
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.register(tool);
        self
    }

    /// Whether answer prompts carry the grounding rules (default on).
    pub fn grounding(mut self, grounding: bool) -> Self {
        self.grounding = grounding;
        self
    }

    /// Set the argument-check policy (default [`ArgumentPolicy::Trusting`]).
    pub fn argument_policy(mut self, argument_policy: ArgumentPolicy) -> Self {
        self.argument_policy = argument_policy;
        self
    }

    /// Build the agent.
    pub fn build(self) -> Agent<B> {
        Agent {
            backend: self.backend,
            tools: self.tools,
            grounding: self.grounding,
            argument_policy: self.argument_policy,
        }
    }
}

/// A conversational agent bound to one backend and one tool registry.
///
/// Configuration is immutable after construction.
pub struct Agent<B> {
    backend: B,
    tools: ToolRegistry,
    grounding: bool,
    argument_policy: ArgumentPolicy,
}

impl<B: Backend> Agent<B> {
    /// Create a builder around a backend.
    pub fn builder(backend: B) -> AgentBuilder<B> {
        AgentBuilder::new(backend)
    }

    /// Decide whether a tool applies to the message.
    ///
    /// An empty registry short-circuits without a network call. A reply
    /// that cannot be parsed degrades to [`ToolDecision::NoTool`]; only
    /// transport failures surface as errors.
    pub async fn decide_tool(&self, message: &str) -> Result<ToolDecision> {
        if self.tools.is_empty() {
            return Ok(ToolDecision::NoTool);
        }

        let prompt = prompt::build_decision_prompt(&self.tools, message);
        let reply = self.backend.decide(DECISION_SYSTEM_PROMPT, &prompt).await?;

        match parse_decision(&reply) {
            Ok(decision) => Ok(decision),
            Err(e) => {
                warn!(error = %e, "unparseable tool decision, continuing without a tool");
                Ok(ToolDecision::NoTool)
            }
        }
    }

    /// Answer a user message.
    ///
    /// Each call is independent: the agent never reads prior turns.
    /// Transport and tool-handler failures propagate; everything else
    /// degrades to an answer without tool context.
    pub async fn ask(&self, message: &str) -> Result<String> {
        let decision = self.decide_tool(message).await?;
        debug!(tool = ?decision.tool_name(), "tool decision");

        let context = self.tool_context(&decision).await?;
        let final_prompt = prompt::build_answer_prompt(message, context.as_deref(), self.grounding);

        self.backend.answer(MARKDOWN_SYSTEM_PROMPT, &final_prompt).await
    }

    /// Resolve and execute the decided tool, rendering its result as a
    /// context block. Lookup misses and strict-mode violations yield no
    /// context; handler failures abort the call.
    async fn tool_context(&self, decision: &ToolDecision) -> Result<Option<String>> {
        let ToolDecision::UseTool { name, arguments } = decision else {
            return Ok(None);
        };

        let Some(tool) = self.tools.get(name) else {
            warn!(tool = %name, "decided tool is not registered, continuing without context");
            return Ok(None);
        };

        if self.argument_policy == ArgumentPolicy::Strict
            && let Err(reason) = check_arguments(tool, arguments)
        {
            warn!(tool = %name, %reason, "rejected tool arguments, continuing without context");
            return Ok(None);
        }

        let result = tool
            .call(Value::Object(arguments.clone()))
            .await
            .map_err(Error::Tool)?;

        Ok(Some(prompt::render_tool_context(tool.name(), &result)))
    }
}

/// Check decided arguments against the tool's declared parameters.
fn check_arguments(tool: &Tool, arguments: &Map<String, Value>) -> std::result::Result<(), String> {
    for (name, spec) in tool.parameters() {
        if spec.required && !arguments.contains_key(name) {
            return Err(format!("missing required parameter '{name}'"));
        }
    }

    for (name, value) in arguments {
        let Some((_, spec)) = tool.parameters().iter().find(|(n, _)| n == name) else {
            return Err(format!("undeclared parameter '{name}'"));
        };
        if !spec.param_type.matches(value) {
            return Err(format!(
                "parameter '{name}' is not a {}",
                spec.param_type.as_str()
            ));
        }
    }

    Ok(())
}
