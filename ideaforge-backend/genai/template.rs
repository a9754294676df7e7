//! Schema-validated prompt templates.
//!
//! A template binds a named prompt string (with `{{{variable}}}`
//! interpolation) to a typed output shape. Running it renders the prompt,
//! submits it with any declared tool descriptors, drives the tool-use loop,
//! and deserializes the model's JSON payload into the output type. A
//! response that is not valid JSON or fails the declared shape is a
//! failure, never a partial success.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::client::{CompletionRequest, ContentBlock, LlmClient, Message, StopReason};
use super::tool::Tool;
use super::GenAiError;

/// Upper bound on model→tool→model round trips in a single invocation.
const MAX_TOOL_ROUNDS: usize = 4;

pub struct PromptTemplate<O> {
    name: &'static str,
    text: &'static str,
    tools: Vec<Arc<dyn Tool>>,
    max_tokens: u32,
    _output: PhantomData<O>,
}

impl<O: DeserializeOwned> PromptTemplate<O> {
    pub fn new(name: &'static str, text: &'static str) -> Self {
        Self {
            name,
            text,
            tools: Vec::new(),
            max_tokens: 4096,
            _output: PhantomData,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Substitute `{{{name}}}` placeholders. Every declared variable must be
    /// bound; a leftover placeholder fails the call before any network I/O.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String, GenAiError> {
        let mut rendered = self.text.to_string();
        for (key, value) in vars {
            rendered = rendered.replace(&format!("{{{{{{{key}}}}}}}"), value);
        }

        if let Some(start) = rendered.find("{{{") {
            let rest = &rendered[start + 3..];
            let name = rest
                .find("}}}")
                .map(|end| rest[..end].to_string())
                .unwrap_or_else(|| "?".to_string());
            return Err(GenAiError::UnboundVariable(name));
        }

        Ok(rendered)
    }

    /// Render, call the provider, resolve tool requests, and validate the
    /// final JSON payload against the output shape.
    pub async fn run(
        &self,
        llm: &dyn LlmClient,
        vars: &[(&str, &str)],
    ) -> Result<O, GenAiError> {
        let prompt = self.render(vars)?;
        let descriptors: Vec<_> = self.tools.iter().map(|t| t.descriptor()).collect();
        let mut messages = vec![Message::user(prompt)];

        for round in 0..MAX_TOOL_ROUNDS {
            let response = llm
                .complete(CompletionRequest {
                    messages: messages.clone(),
                    tools: descriptors.clone(),
                    max_tokens: self.max_tokens,
                })
                .await?;

            tracing::debug!(
                template = self.name,
                round,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                stop_reason = ?response.stop_reason,
                "completion finished"
            );

            if response.stop_reason == StopReason::ToolUse {
                let mut results = Vec::with_capacity(response.tool_calls.len());
                for call in &response.tool_calls {
                    let tool = self
                        .tools
                        .iter()
                        .find(|t| t.name() == call.name)
                        .ok_or_else(|| GenAiError::UnknownTool(call.name.clone()))?;
                    tracing::debug!(template = self.name, tool = %call.name, "invoking tool");
                    let output = tool.invoke(call.input.clone()).await?;
                    results.push(ContentBlock::tool_result(&call.id, output.to_string()));
                }
                messages.push(Message::assistant_blocks(response.blocks));
                messages.push(Message::user_blocks(results));
                continue;
            }

            let text = response.content.ok_or(GenAiError::EmptyResponse)?;
            return parse_output(self.name, &text);
        }

        Err(GenAiError::ToolLoopExceeded(MAX_TOOL_ROUNDS))
    }
}

/// Pull the JSON object out of the model's text and deserialize it.
///
/// Models wrap payloads in prose or code fences despite instructions, so we
/// take the outermost `{ ... }` slice rather than parsing the text verbatim.
fn parse_output<O: DeserializeOwned>(template: &str, text: &str) -> Result<O, GenAiError> {
    let start = text.find('{').ok_or_else(|| {
        GenAiError::Schema(format!("no JSON object in `{template}` response"))
    })?;
    let end = text.rfind('}').ok_or_else(|| {
        GenAiError::Schema(format!("unterminated JSON object in `{template}` response"))
    })?;
    if end < start {
        return Err(GenAiError::Schema(format!(
            "unterminated JSON object in `{template}` response"
        )));
    }

    serde_json::from_str(&text[start..=end])
        .map_err(|e| GenAiError::Schema(format!("`{template}`: {e}")))
}
