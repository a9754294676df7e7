//! Trend-grounding tool declared by the idea-generation template.

use async_trait::async_trait;
use serde_json::json;

use crate::genai::{GenAiError, Tool};

/// Stand-in trend source returning canned, topic-interpolated headlines.
///
/// The prompt instructs the model to call `getTopicTrends` for grounding, so
/// the name and shapes here are load-bearing. A real data source replaces
/// this behind the same trait without touching the template or flows.
pub struct TopicTrends;

#[async_trait]
impl Tool for TopicTrends {
    fn name(&self) -> &'static str {
        "getTopicTrends"
    }

    fn description(&self) -> &'static str {
        "Retrieves trending information, controversies, or recent news for a \
         given topic, person, or tool."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic, person, or tool to search for."
                }
            },
            "required": ["topic"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<serde_json::Value, GenAiError> {
        let topic = input["topic"].as_str().ok_or_else(|| {
            GenAiError::Schema("getTopicTrends expects a `topic` string".to_string())
        })?;

        tracing::debug!(topic, "returning canned trend headlines");
        Ok(json!([
            format!("Trending story about {topic} 1"),
            format!("Recent controversy involving {topic}"),
            format!("New feature/update for {topic}"),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trends_returns_three_topic_headlines() {
        let out = TopicTrends
            .invoke(serde_json::json!({ "topic": "React" }))
            .await
            .unwrap();

        let headlines = out.as_array().unwrap();
        assert_eq!(headlines.len(), 3);
        for headline in headlines {
            assert!(headline.as_str().unwrap().contains("React"));
        }
    }

    #[tokio::test]
    async fn test_trends_rejects_missing_topic() {
        let err = TopicTrends.invoke(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, GenAiError::Schema(_)));
    }

    #[test]
    fn test_descriptor_shape() {
        let descriptor = TopicTrends.descriptor();
        assert_eq!(descriptor.name, "getTopicTrends");
        assert_eq!(descriptor.input_schema["required"][0], "topic");
    }
}
