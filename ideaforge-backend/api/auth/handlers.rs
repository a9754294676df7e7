/// Session endpoints.
///
/// POST /api/auth/session — exchange the external provider's profile for a
///                          bearer token; creates the user's profile
///                          document on first sign-in only
/// GET  /api/auth/me      — the signed-in identity's stored profile
///
/// Sign-out is client-side token disposal; tokens are stateless and simply
/// expire.
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::auth::{mint_token, AuthUser};
use crate::store::UserProfile;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSessionRequest {
    uid: String,
    display_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

pub(crate) async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body.uid.trim().is_empty() || body.display_name.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "uid and displayName are required" })),
        ));
    }

    let user = AuthUser {
        uid: body.uid,
        display_name: body.display_name,
        email: body.email,
        photo_url: body.photo_url,
    };

    let profile = state
        .library
        .create_profile_if_absent(UserProfile {
            uid: user.uid.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            photo_url: user.photo_url.clone(),
            created_at: Utc::now().to_rfc3339(),
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, uid = %user.uid, "failed to ensure user profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to create session" })),
            )
        })?;

    let token = mint_token(&state.auth_secret, &user).map_err(|e| {
        tracing::error!(error = %e, "failed to mint session token");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "failed to create session" })),
        )
    })?;

    Ok(Json(json!({ "token": token, "profile": profile })))
}

pub(crate) async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let profile = state.library.get_profile(&user.uid).await.map_err(|e| {
        tracing::error!(error = %e, uid = %user.uid, "failed to load user profile");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "failed to load profile" })),
        )
    })?;

    match profile {
        Some(profile) => Ok(Json(json!({ "profile": profile }))),
        // Token is valid but the profile document is gone; fall back to the
        // identity baked into the token.
        None => Ok(Json(json!({ "profile": user }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::app_state;
    use crate::auth::verify_token;
    use crate::store::repository::IdeaLibrary;

    fn session_request(uid: &str, name: &str) -> CreateSessionRequest {
        CreateSessionRequest {
            uid: uid.to_string(),
            display_name: name.to_string(),
            email: Some("ada@example.com".to_string()),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_session_mints_verifiable_token() {
        let (state, _, _) = app_state(vec![]);
        let secret = state.auth_secret.clone();

        let Json(body) = create_session(State(state), Json(session_request("user-1", "Ada")))
            .await
            .unwrap();

        let token = body["token"].as_str().unwrap();
        let verified = verify_token(&secret, token).unwrap();
        assert_eq!(verified.uid, "user-1");
        assert_eq!(body["profile"]["displayName"], "Ada");
    }

    #[tokio::test]
    async fn test_first_sign_in_creates_profile_once() {
        let (state, _, library) = app_state(vec![]);

        create_session(State(state.clone()), Json(session_request("user-1", "Ada")))
            .await
            .unwrap();
        // Second sign-in with a changed display name keeps the original doc.
        let Json(body) = create_session(State(state), Json(session_request("user-1", "Ada L.")))
            .await
            .unwrap();

        assert_eq!(body["profile"]["displayName"], "Ada");
        assert_eq!(
            library
                .get_profile("user-1")
                .await
                .unwrap()
                .unwrap()
                .display_name,
            "Ada"
        );
    }

    #[tokio::test]
    async fn test_create_session_rejects_blank_uid() {
        let (state, _, _) = app_state(vec![]);

        let err = create_session(State(state), Json(session_request(" ", "Ada")))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_me_falls_back_to_token_identity() {
        let (state, _, _) = app_state(vec![]);
        let user = AuthUser {
            uid: "user-2".to_string(),
            display_name: "Grace".to_string(),
            email: None,
            photo_url: None,
        };

        // No profile document exists for this uid.
        let Json(body) = me(State(state), user).await.unwrap();
        assert_eq!(body["profile"]["displayName"], "Grace");
    }
}
