/// Story generation endpoint.
///
/// POST /api/stories/generate — free-form prompt → short fantasy story
use axum::extract::State;
use axum::Json;
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::flows::Story;

#[derive(Deserialize)]
pub(crate) struct GenerateStoryRequest {
    prompt: String,
}

#[tracing::instrument(skip_all)]
pub(crate) async fn generate_story(
    State(state): State<AppState>,
    Json(body): Json<GenerateStoryRequest>,
) -> Result<Json<Story>, (StatusCode, Json<Value>)> {
    let prompt = body.prompt.trim();
    if prompt.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "prompt is required" })),
        ));
    }

    let story = state.actions.generate_story(prompt).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.message })),
        )
    })?;

    Ok(Json(story))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::GENERATE_STORY_FAILED;
    use crate::api::testing::app_state;
    use crate::genai::client::CompletionResponse;
    use crate::genai::GenAiError;

    #[tokio::test]
    async fn test_story_rejects_empty_prompt_before_any_provider_call() {
        let (state, llm, _) = app_state(vec![]);

        let err = generate_story(
            State(state),
            Json(GenerateStoryRequest {
                prompt: "".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_story_returns_story_text() {
        let (state, _, _) = app_state(vec![Ok(CompletionResponse::text(
            r#"{"story":"Long ago, beneath the peaks of a nameless valley, a lost knight wandered until a voice rang out from the scabbard at his side. The sword spoke of old oaths and forgotten shrines, and together they walked the mountain road until the knight, at last, found his way home."}"#,
        ))]);

        let Json(story) = generate_story(
            State(state),
            Json(GenerateStoryRequest {
                prompt: "A lost knight who finds a talking sword".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(story.story.len() > 200);
    }

    #[tokio::test]
    async fn test_story_failure_is_generic_500() {
        let (state, _, _) = app_state(vec![Err(GenAiError::EmptyResponse)]);

        let (status, Json(body)) = generate_story(
            State(state),
            Json(GenerateStoryRequest {
                prompt: "a knight".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], GENERATE_STORY_FAILED);
    }
}
