use thiserror::Error;

/// Failures raised by prompt templates and the provider client.
///
/// The action layer collapses all of these into fixed user-facing messages;
/// the distinction only matters for logs and for tests.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// A template placeholder was left unfilled by the caller.
    #[error("template variable `{0}` was not provided")]
    UnboundVariable(String),

    /// The model asked for a tool the template never declared.
    #[error("model requested unknown tool `{0}`")]
    UnknownTool(String),

    /// The model's JSON payload is missing, malformed, or fails the
    /// declared output shape. Partial data is never forwarded.
    #[error("model response did not match the expected shape: {0}")]
    Schema(String),

    /// The model finished without producing any text content.
    #[error("model returned no text content")]
    EmptyResponse,

    /// The model kept requesting tools past the round limit.
    #[error("tool loop exceeded {0} rounds")]
    ToolLoopExceeded(usize),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    /// True for failures caused by input or output shape, as opposed to
    /// failures reaching the provider.
    #[allow(dead_code)]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenAiError::UnboundVariable(_)
                | GenAiError::Schema(_)
                | GenAiError::EmptyResponse
                | GenAiError::Json(_)
        )
    }
}
