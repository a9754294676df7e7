/// Saved-idea library endpoints. All except the event stream require a
/// signed-in identity.
///
/// GET    /api/library         — the caller's saved ideas, newest first
/// POST   /api/library         — accept an idea for saving; the write runs
///                               in a spawned task and the outcome is only
///                               observable on the event stream (202)
/// DELETE /api/library/{id}    — remove one of the caller's ideas
/// GET    /api/library/events  — SSE stream of save outcomes
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use chrono::Utc;
use futures::stream::Stream;
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::store::events::LibraryEvent;
use crate::store::SavedIdea;

pub(crate) async fn list_ideas(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let ideas = state.library.list_ideas(&user.uid).await.map_err(|e| {
        tracing::error!(error = %e, uid = %user.uid, "failed to list saved ideas");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "failed to load saved ideas" })),
        )
    })?;

    Ok(Json(json!({ "ideas": ideas })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveIdeaRequest {
    niche: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    script_outline: String,
    #[serde(default)]
    thumbnail_concept: String,
    #[serde(default)]
    video_description_draft: String,
}

/// Accepts the idea and returns immediately; durability is reported on the
/// event stream, never through this response.
pub(crate) async fn save_idea(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<SaveIdeaRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if body.title.trim().is_empty() || body.niche.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "niche and title are required" })),
        ));
    }

    let idea = SavedIdea {
        id: Uuid::new_v4().to_string(),
        user_id: user.uid.clone(),
        niche: body.niche,
        title: body.title,
        description: body.description,
        script_outline: body.script_outline,
        thumbnail_concept: body.thumbnail_concept,
        video_description_draft: body.video_description_draft,
        created_at: Utc::now().to_rfc3339(),
    };

    let id = idea.id.clone();
    let library = state.library.clone();
    let events_tx = state.library_events_tx.clone();

    tokio::spawn(async move {
        let event = match library.save_idea(idea.clone()).await {
            Ok(()) => {
                tracing::info!(idea_id = %idea.id, uid = %idea.user_id, "idea saved");
                LibraryEvent::saved(&idea.user_id, &idea.id, &idea.title)
            }
            Err(e) => {
                tracing::error!(idea_id = %idea.id, uid = %idea.user_id, error = %e, "idea save failed");
                LibraryEvent::save_failed(&idea.user_id, &idea.id, &idea.title, &e.to_string())
            }
        };
        let _ = events_tx.send(event);
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "id": id, "status": "accepted" })),
    ))
}

pub(crate) async fn delete_idea(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let existed = state
        .library
        .delete_idea(&user.uid, &id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, idea_id = %id, "failed to delete saved idea");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to delete idea" })),
            )
        })?;

    if !existed {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "idea not found" })),
        ));
    }

    Ok(Json(json!({ "deleted": true })))
}

pub(crate) async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.library_events_tx.subscribe();
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let sse_event_name = event.outcome.as_sse_event();
                    let data = serde_json::to_string(&event).unwrap_or_default();
                    yield Ok(Event::default().event(sse_event_name).data(data));
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "library SSE subscriber lagged");
                    continue;
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };
    Sse::new(stream).keep_alive(KeepAlive::new().interval(std::time::Duration::from_secs(15)))
}
