pub mod handlers;

use axum::routing::post;
use axum::Router;

use crate::api::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ideas/generate", post(handlers::generate_ideas))
        .route("/ideas/expand", post(handlers::expand_idea))
}
