pub mod handlers;

use axum::routing::{delete, get};
use axum::Router;

use crate::api::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/library",
            get(handlers::list_ideas).post(handlers::save_idea),
        )
        .route("/library/{id}", delete(handlers::delete_idea))
        .route("/library/events", get(handlers::stream_events))
}
