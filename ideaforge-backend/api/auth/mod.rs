pub mod handlers;

use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/session", post(handlers::create_session))
        .route("/auth/me", get(handlers::me))
}
