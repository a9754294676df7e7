//! Anthropic Messages API client.
//!
//! One POST per completion; no retries — transport and API failures
//! propagate to the caller immediately.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::client::{
    CompletionRequest, CompletionResponse, ContentBlock, LlmClient, Message, MessageContent,
    StopReason, ToolCall, Usage,
};
use super::GenAiError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(
        http: Client,
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            http,
            max_tokens,
        }
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "messages": convert_messages(&request.messages),
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(
                request.tools.iter().map(|t| t.to_wire()).collect::<Vec<_>>()
            );
        }

        body
    }

    fn parse_response(&self, wire: WireResponse) -> CompletionResponse {
        let mut text = String::new();
        let mut blocks = Vec::new();
        let mut tool_calls = Vec::new();

        for block in wire.content {
            match block {
                WireContentBlock::Text { text: t } => {
                    text.push_str(&t);
                    blocks.push(ContentBlock::Text { text: t });
                }
                WireContentBlock::ToolUse { id, name, input } => {
                    tool_calls.push(ToolCall {
                        id: id.clone(),
                        name: name.clone(),
                        input: input.clone(),
                    });
                    blocks.push(ContentBlock::ToolUse { id, name, input });
                }
            }
        }

        CompletionResponse {
            content: if text.is_empty() { None } else { Some(text) },
            blocks,
            tool_calls,
            stop_reason: StopReason::from_wire(&wire.stop_reason),
            usage: Usage {
                input_tokens: wire.usage.input_tokens,
                output_tokens: wire.usage.output_tokens,
            },
        }
    }
}

fn convert_messages(messages: &[Message]) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|msg| {
            let content = match &msg.content {
                MessageContent::Text(text) => serde_json::json!(text),
                MessageContent::Blocks(blocks) => serde_json::json!(blocks),
            };
            serde_json::json!({
                "role": msg.role,
                "content": content,
            })
        })
        .collect()
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, GenAiError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status, model = %self.model, "provider call failed");
            return Err(GenAiError::Api { status, message });
        }

        let wire: WireResponse = serde_json::from_str(&response.text().await?)?;
        Ok(self.parse_response(wire))
    }
}

// Provider wire types

#[derive(Debug, Deserialize)]
struct WireResponse {
    content: Vec<WireContentBlock>,
    stop_reason: String,
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WireContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genai::client::ToolDescriptor;

    fn client() -> AnthropicClient {
        AnthropicClient::new(
            Client::new(),
            "claude-3-5-haiku-latest",
            "test-key",
            "https://api.anthropic.com",
            4096,
        )
    }

    #[test]
    fn test_build_request_body_basic() {
        let request = CompletionRequest {
            messages: vec![Message::user("Hello")],
            tools: vec![],
            max_tokens: 1000,
        };

        let body = client().build_request_body(&request);

        assert_eq!(body["model"], "claude-3-5-haiku-latest");
        assert_eq!(body["max_tokens"], 1000);
        assert!(body["messages"].is_array());
        assert_eq!(body["messages"][0]["role"], "user");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_build_request_body_with_tools() {
        let request = CompletionRequest {
            messages: vec![Message::user("Generate ideas")],
            tools: vec![ToolDescriptor {
                name: "getTopicTrends".to_string(),
                description: "Fetch trends".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": { "topic": { "type": "string" } }
                }),
            }],
            max_tokens: 1000,
        };

        let body = client().build_request_body(&request);

        assert!(body["tools"].is_array());
        assert_eq!(body["tools"][0]["name"], "getTopicTrends");
    }

    #[test]
    fn test_max_tokens_capped_at_client_limit() {
        let request = CompletionRequest {
            messages: vec![],
            tools: vec![],
            max_tokens: 100_000,
        };

        let body = client().build_request_body(&request);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_parse_response_text_and_tool_use() {
        let wire: WireResponse = serde_json::from_value(serde_json::json!({
            "content": [
                { "type": "text", "text": "Looking up trends." },
                {
                    "type": "tool_use",
                    "id": "toolu_01",
                    "name": "getTopicTrends",
                    "input": { "topic": "React" }
                }
            ],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 12, "output_tokens": 34 }
        }))
        .unwrap();

        let parsed = client().parse_response(wire);

        assert_eq!(parsed.stop_reason, StopReason::ToolUse);
        assert_eq!(parsed.content.as_deref(), Some("Looking up trends."));
        assert_eq!(parsed.tool_calls.len(), 1);
        assert_eq!(parsed.tool_calls[0].name, "getTopicTrends");
        assert_eq!(parsed.tool_calls[0].input["topic"], "React");
        assert_eq!(parsed.blocks.len(), 2);
        assert_eq!(parsed.usage.input_tokens, 12);
    }
}
