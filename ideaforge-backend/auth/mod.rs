//! Bearer-token identity.
//!
//! The actual sign-in happens against an external provider in the UI; the
//! server only mints a session token from the provider's profile and
//! verifies it on library routes. Flows and actions have no dependency on
//! any of this.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::Json;
use chrono::{Duration, Utc};
use hyper::StatusCode;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::AppState;

/// Session lifetime: seven days.
const TOKEN_TTL_HOURS: i64 = 24 * 7;

/// The signed-in identity as the rest of the server sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    iat: i64,
    exp: i64,
}

pub fn mint_token(secret: &str, user: &AuthUser) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.uid.clone(),
        name: user.display_name.clone(),
        email: user.email.clone(),
        picture: user.photo_url.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(secret: &str, token: &str) -> Result<AuthUser, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(AuthUser {
        uid: data.claims.sub,
        display_name: data.claims.name,
        email: data.claims.email,
        photo_url: data.claims.picture,
    })
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "authentication required" })),
    )
}

/// Extracts the bearer identity; rejects with 401 so the UI can present its
/// sign-in prompt instead of an error toast.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(hyper::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(unauthorized)?;

        verify_token(&state.auth_secret, token).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            unauthorized()
        })
    }
}
