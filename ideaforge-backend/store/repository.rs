use anyhow::Result;
use async_trait::async_trait;

use super::{SavedIdea, UserProfile};

#[async_trait]
pub trait IdeaLibrary: Send + Sync {
    /// A user's saved ideas, newest first.
    async fn list_ideas(&self, user_id: &str) -> Result<Vec<SavedIdea>>;
    async fn save_idea(&self, idea: SavedIdea) -> Result<()>;
    /// Returns false when no idea with that id belongs to the user.
    async fn delete_idea(&self, user_id: &str, id: &str) -> Result<bool>;

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>>;
    /// Create the profile document only if the user has none yet; returns
    /// the stored profile either way.
    async fn create_profile_if_absent(&self, profile: UserProfile) -> Result<UserProfile>;
}
