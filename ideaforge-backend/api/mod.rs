pub mod auth;
pub mod ideas;
pub mod library;
pub mod middleware;
mod routes;
pub mod stories;

use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;

use crate::actions::Actions;
use crate::store::events::LibraryEvent;
use crate::store::repository::IdeaLibrary;

#[derive(Clone)]
pub struct AppState {
    pub actions: Arc<Actions>,
    pub library: Arc<dyn IdeaLibrary>,
    /// Side channel for fire-and-forget save outcomes.
    pub library_events_tx: broadcast::Sender<LibraryEvent>,
    /// HS256 secret for session tokens.
    pub auth_secret: String,
}

pub fn create_app(state: AppState) -> Router {
    routes::build_router(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use tokio::sync::broadcast;

    use super::AppState;
    use crate::actions::Actions;
    use crate::flows::ContentFlows;
    use crate::genai::client::CompletionResponse;
    use crate::genai::testing::ScriptedClient;
    use crate::genai::GenAiError;
    use crate::store::memory_repository::MemoryIdeaLibrary;

    /// AppState over a scripted provider and an in-memory library.
    pub fn app_state(
        responses: Vec<Result<CompletionResponse, GenAiError>>,
    ) -> (AppState, Arc<ScriptedClient>, Arc<MemoryIdeaLibrary>) {
        let llm = Arc::new(ScriptedClient::new(responses));
        let library = Arc::new(MemoryIdeaLibrary::new());
        let (library_events_tx, _) = broadcast::channel(16);
        let state = AppState {
            actions: Arc::new(Actions::new(ContentFlows::new(llm.clone()))),
            library: library.clone(),
            library_events_tx,
            auth_secret: "test-secret".to_string(),
        };
        (state, llm, library)
    }
}
