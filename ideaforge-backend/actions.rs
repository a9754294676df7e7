//! Action boundary between the HTTP layer and the flows.
//!
//! Every internal failure — validation or transport — collapses to one of
//! three fixed, user-safe messages. Logs retain the specifics; callers get a
//! stable, generic contract.

use thiserror::Error;

use crate::flows::{ContentFlows, IdeaBreakdown, IdeaList, Story};

pub const GENERATE_IDEAS_FAILED: &str = "Failed to generate content ideas.";
pub const EXPAND_IDEA_FAILED: &str = "Failed to expand content idea.";
pub const GENERATE_STORY_FAILED: &str = "Failed to generate story.";

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: &'static str,
}

pub struct Actions {
    flows: ContentFlows,
}

impl Actions {
    pub fn new(flows: ContentFlows) -> Self {
        Self { flows }
    }

    pub async fn generate_ideas(&self, topic: &str) -> Result<IdeaList, ActionError> {
        self.flows.generate_ideas(topic).await.map_err(|e| {
            tracing::error!(error = %e, topic, "content idea generation failed");
            ActionError {
                message: GENERATE_IDEAS_FAILED,
            }
        })
    }

    pub async fn expand_idea(&self, topic: &str, idea: &str) -> Result<IdeaBreakdown, ActionError> {
        self.flows.expand_idea(topic, idea).await.map_err(|e| {
            tracing::error!(error = %e, topic, idea, "idea expansion failed");
            ActionError {
                message: EXPAND_IDEA_FAILED,
            }
        })
    }

    pub async fn generate_story(&self, prompt: &str) -> Result<Story, ActionError> {
        self.flows.generate_story(prompt).await.map_err(|e| {
            tracing::error!(error = %e, "story generation failed");
            ActionError {
                message: GENERATE_STORY_FAILED,
            }
        })
    }
}
