/// Idea generation endpoints.
///
/// POST /api/ideas/generate — topic → ordered list of ideas
/// POST /api/ideas/expand   — topic + idea title → detailed breakdown
///
/// Input is validated here, before any flow invocation; flow failures reach
/// the caller only as the action layer's fixed messages.
use axum::extract::State;
use axum::Json;
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::flows::{IdeaBreakdown, IdeaList};

#[derive(Deserialize)]
pub(crate) struct GenerateIdeasRequest {
    topic: String,
}

#[tracing::instrument(skip_all, fields(topic = %body.topic))]
pub(crate) async fn generate_ideas(
    State(state): State<AppState>,
    Json(body): Json<GenerateIdeasRequest>,
) -> Result<Json<IdeaList>, (StatusCode, Json<Value>)> {
    let topic = body.topic.trim();
    if topic.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "topic is required" })),
        ));
    }

    let ideas = state.actions.generate_ideas(topic).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.message })),
        )
    })?;

    Ok(Json(ideas))
}

#[derive(Deserialize)]
pub(crate) struct ExpandIdeaRequest {
    topic: String,
    idea: String,
}

#[tracing::instrument(skip_all, fields(topic = %body.topic, idea = %body.idea))]
pub(crate) async fn expand_idea(
    State(state): State<AppState>,
    Json(body): Json<ExpandIdeaRequest>,
) -> Result<Json<IdeaBreakdown>, (StatusCode, Json<Value>)> {
    let topic = body.topic.trim();
    let idea = body.idea.trim();
    if topic.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "topic is required" })),
        ));
    }
    if idea.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "idea is required" })),
        ));
    }

    let breakdown = state.actions.expand_idea(topic, idea).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.message })),
        )
    })?;

    Ok(Json(breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::GENERATE_IDEAS_FAILED;
    use crate::api::testing::app_state;
    use crate::genai::client::CompletionResponse;
    use crate::genai::GenAiError;

    #[tokio::test]
    async fn test_generate_rejects_empty_topic_before_any_provider_call() {
        let (state, llm, _) = app_state(vec![]);

        let err = generate_ideas(
            State(state),
            Json(GenerateIdeasRequest {
                topic: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_returns_idea_list() {
        let (state, _, _) = app_state(vec![
            Ok(CompletionResponse::text(r#"{"analyzedTopic":"React.js"}"#)),
            Ok(CompletionResponse::text(
                r#"{"ideas":[{"title":"T1","description":"D1"},{"title":"T2","description":"D2"}]}"#,
            )),
        ]);

        let Json(list) = generate_ideas(
            State(state),
            Json(GenerateIdeasRequest {
                topic: "React".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(list.ideas.len(), 2);
        assert!(!list.ideas[0].title.is_empty());
        assert!(!list.ideas[0].description.is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_is_generic_500() {
        let (state, _, _) = app_state(vec![Err(GenAiError::Api {
            status: 503,
            message: "provider secret detail".to_string(),
        })]);

        let (status, Json(body)) = generate_ideas(
            State(state),
            Json(GenerateIdeasRequest {
                topic: "React".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], GENERATE_IDEAS_FAILED);
        assert!(!body.to_string().contains("provider secret detail"));
    }

    #[tokio::test]
    async fn test_expand_rejects_missing_idea_title() {
        let (state, llm, _) = app_state(vec![]);

        let err = expand_idea(
            State(state),
            Json(ExpandIdeaRequest {
                topic: "React".to_string(),
                idea: "".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_expand_returns_four_field_breakdown() {
        let (state, _, _) = app_state(vec![Ok(CompletionResponse::text(
            r#"{"scriptOutline":"Hook\nDemo\nRecap","thumbnailConcepts":"Big arrow","titleSuggestions":["5 Hidden React Hooks"],"videoDescriptionDraft":"In this video..."}"#,
        ))]);

        let Json(breakdown) = expand_idea(
            State(state),
            Json(ExpandIdeaRequest {
                topic: "React".to_string(),
                idea: "5 Hidden React Hooks".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(breakdown.script_outline.lines().count() > 1);
        assert!(!breakdown.title_suggestions.is_empty());
        assert!(!breakdown.video_description_draft.is_empty());
    }
}
