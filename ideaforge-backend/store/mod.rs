//! Per-user idea library persistence.

pub mod events;
pub mod memory_repository;
pub mod mongo_repository;
pub mod repository;

use serde::{Deserialize, Serialize};

/// An accepted idea persisted to a user's library. Wire and document field
/// names stay camelCase so the store is readable by the existing frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedIdea {
    pub id: String,
    pub user_id: String,
    pub niche: String,
    pub title: String,
    pub description: String,
    pub script_outline: String,
    pub thumbnail_concept: String,
    pub video_description_draft: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Per-user profile document, created at most once on first sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_idea_roundtrip() {
        let idea = SavedIdea {
            id: "idea-1".to_string(),
            user_id: "user-1".to_string(),
            niche: "React".to_string(),
            title: "5 Hidden React Hooks".to_string(),
            description: "Lesser-known hooks.".to_string(),
            script_outline: "Scene 1\nScene 2".to_string(),
            thumbnail_concept: "Bold yellow text".to_string(),
            video_description_draft: "Watch this.".to_string(),
            created_at: "2026-08-06T12:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["scriptOutline"], "Scene 1\nScene 2");
        assert_eq!(json["videoDescriptionDraft"], "Watch this.");

        let parsed: SavedIdea = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.title, "5 Hidden React Hooks");
    }

    #[test]
    fn test_profile_optional_fields_default() {
        let parsed: UserProfile = serde_json::from_value(serde_json::json!({
            "uid": "user-1",
            "displayName": "Ada",
            "createdAt": "2026-08-06T12:00:00Z"
        }))
        .unwrap();
        assert!(parsed.email.is_none());
        assert!(parsed.photo_url.is_none());
    }
}
