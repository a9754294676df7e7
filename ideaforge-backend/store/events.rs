//! Save-outcome events for the fire-and-forget write path.
//!
//! Library writes return 202 before the document store confirms anything;
//! these events are the only channel through which a caller can observe the
//! real outcome.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LibraryEvent {
    pub user_id: String,
    pub idea_id: String,
    pub title: String,
    pub outcome: LibraryEventOutcome,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LibraryEventOutcome {
    Saved,
    SaveFailed,
}

impl LibraryEventOutcome {
    pub fn as_sse_event(&self) -> &'static str {
        match self {
            LibraryEventOutcome::Saved => "idea_saved",
            LibraryEventOutcome::SaveFailed => "idea_save_failed",
        }
    }
}

impl LibraryEvent {
    pub fn saved(user_id: &str, idea_id: &str, title: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            idea_id: idea_id.to_string(),
            title: title.to_string(),
            outcome: LibraryEventOutcome::Saved,
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn save_failed(user_id: &str, idea_id: &str, title: &str, error: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            idea_id: idea_id.to_string(),
            title: title.to_string(),
            outcome: LibraryEventOutcome::SaveFailed,
            timestamp: Utc::now(),
            error: Some(error.to_string()),
        }
    }
}
