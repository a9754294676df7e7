//! In-memory idea library, used in tests and when no document store is
//! configured. Not durable across restarts.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::IdeaLibrary;
use super::{SavedIdea, UserProfile};

#[derive(Default)]
pub struct MemoryIdeaLibrary {
    ideas: RwLock<HashMap<String, Vec<SavedIdea>>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryIdeaLibrary {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdeaLibrary for MemoryIdeaLibrary {
    async fn list_ideas(&self, user_id: &str) -> Result<Vec<SavedIdea>> {
        let mut ideas = self
            .ideas
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        ideas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ideas)
    }

    async fn save_idea(&self, idea: SavedIdea) -> Result<()> {
        self.ideas
            .write()
            .await
            .entry(idea.user_id.clone())
            .or_default()
            .push(idea);
        Ok(())
    }

    async fn delete_idea(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut ideas = self.ideas.write().await;
        let Some(list) = ideas.get_mut(user_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|idea| idea.id != id);
        Ok(list.len() < before)
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn create_profile_if_absent(&self, profile: UserProfile) -> Result<UserProfile> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .entry(profile.uid.clone())
            .or_insert(profile)
            .clone())
    }
}
