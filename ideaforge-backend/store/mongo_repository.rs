//! MongoDB-backed idea library.
//!
//! Documents are stored with the same camelCase field names the API speaks,
//! one collection for ideas (filtered by `userId`) and one for profiles.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Client, Collection};

use super::repository::IdeaLibrary;
use super::{SavedIdea, UserProfile};

const IDEAS_COLLECTION: &str = "video_ideas";
const PROFILES_COLLECTION: &str = "user_profiles";

pub struct MongoIdeaLibrary {
    ideas: Collection<SavedIdea>,
    profiles: Collection<UserProfile>,
}

impl MongoIdeaLibrary {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("failed to connect to MongoDB")?;
        let db = client.database(database);

        tracing::info!(database, "connected to MongoDB idea library");
        Ok(Self {
            ideas: db.collection(IDEAS_COLLECTION),
            profiles: db.collection(PROFILES_COLLECTION),
        })
    }
}

#[async_trait]
impl IdeaLibrary for MongoIdeaLibrary {
    async fn list_ideas(&self, user_id: &str) -> Result<Vec<SavedIdea>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let mut cursor = self
            .ideas
            .find(doc! { "userId": user_id }, options)
            .await
            .context("failed to query saved ideas")?;

        let mut ideas = Vec::new();
        while let Some(idea) = cursor
            .try_next()
            .await
            .context("failed to read saved idea cursor")?
        {
            ideas.push(idea);
        }
        Ok(ideas)
    }

    async fn save_idea(&self, idea: SavedIdea) -> Result<()> {
        self.ideas
            .insert_one(&idea, None)
            .await
            .with_context(|| format!("failed to save idea {}", idea.id))?;
        Ok(())
    }

    async fn delete_idea(&self, user_id: &str, id: &str) -> Result<bool> {
        let result = self
            .ideas
            .delete_one(doc! { "id": id, "userId": user_id }, None)
            .await
            .with_context(|| format!("failed to delete idea {id}"))?;
        Ok(result.deleted_count > 0)
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.profiles
            .find_one(doc! { "uid": uid }, None)
            .await
            .context("failed to query user profile")
    }

    async fn create_profile_if_absent(&self, profile: UserProfile) -> Result<UserProfile> {
        if let Some(existing) = self.get_profile(&profile.uid).await? {
            return Ok(existing);
        }

        self.profiles
            .insert_one(&profile, None)
            .await
            .with_context(|| format!("failed to create profile for {}", profile.uid))?;
        tracing::info!(uid = %profile.uid, "created user profile on first sign-in");
        Ok(profile)
    }
}
