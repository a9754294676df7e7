//! Content flows: named, typed operations composing prompt template calls.
//!
//! Flows add no error translation — template validation and transport
//! failures propagate unchanged to the action layer.

mod templates;
pub mod trends;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::genai::{GenAiError, LlmClient};

/// One content idea, as produced in ordered lists by `generate_ideas`.
///
/// The prompt asks for 5 ideas but the count is advisory: any length,
/// including zero, is a valid displayable result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIdea {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaList {
    pub ideas: Vec<ContentIdea>,
}

/// Detailed breakdown of a single idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaBreakdown {
    pub script_outline: String,
    pub thumbnail_concepts: String,
    pub title_suggestions: Vec<String>,
    pub video_description_draft: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub story: String,
}

/// Stage-1 output of the two-stage idea flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedTopic {
    pub analyzed_topic: String,
}

pub struct ContentFlows {
    llm: Arc<dyn LlmClient>,
}

impl ContentFlows {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Refine a free-text topic into an enriched topic string.
    async fn analyze_topic(&self, topic: &str) -> Result<AnalyzedTopic, GenAiError> {
        templates::analyze_topic()
            .run(self.llm.as_ref(), &[("topic", topic)])
            .await
    }

    /// Two-stage idea generation: analyze the topic, then generate ideas
    /// from the enriched topic with the trends tool available. Stage 2
    /// cannot start before stage 1's output is in hand.
    pub async fn generate_ideas(&self, topic: &str) -> Result<IdeaList, GenAiError> {
        let analyzed = self.analyze_topic(topic).await?;
        tracing::debug!(topic, analyzed = %analyzed.analyzed_topic, "topic analyzed");
        templates::generate_ideas()
            .run(
                self.llm.as_ref(),
                &[("analyzedTopic", &analyzed.analyzed_topic)],
            )
            .await
    }

    pub async fn expand_idea(
        &self,
        topic: &str,
        idea: &str,
    ) -> Result<IdeaBreakdown, GenAiError> {
        templates::expand_idea()
            .run(self.llm.as_ref(), &[("topic", topic), ("idea", idea)])
            .await
    }

    pub async fn generate_story(&self, prompt: &str) -> Result<Story, GenAiError> {
        templates::fantasy_story()
            .run(self.llm.as_ref(), &[("prompt", prompt)])
            .await
    }
}
