/// Server configuration loaded from environment variables.
pub struct Config {
    pub port: u16,
    pub sentry_dsn: Option<String>,
    pub environment: String,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub llm_base_url: String,
    pub llm_max_tokens: u32,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub auth_token_secret: String,
}

const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Fallback signing secret for local development. Real deployments must set
/// AUTH_TOKEN_SECRET; `main` logs a warning when this fallback is in use.
pub const DEV_TOKEN_SECRET: &str = "ideaforge-dev-secret";

impl Config {
    pub fn from_env() -> Self {
        Self::from_raw_values(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("SENTRY_DSN").ok().as_deref(),
            std::env::var("ENVIRONMENT").ok().as_deref(),
            std::env::var("ANTHROPIC_API_KEY").ok().as_deref(),
            std::env::var("LLM_MODEL").ok().as_deref(),
            std::env::var("LLM_BASE_URL").ok().as_deref(),
            std::env::var("LLM_MAX_TOKENS").ok().as_deref(),
            std::env::var("MONGODB_URI").ok().as_deref(),
            std::env::var("MONGODB_DATABASE").ok().as_deref(),
            std::env::var("AUTH_TOKEN_SECRET").ok().as_deref(),
        )
    }

    /// Build a Config from raw string values (as they would come from env vars).
    /// Used directly in tests to avoid mutating process-global environment.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw_values(
        port: Option<&str>,
        sentry_dsn: Option<&str>,
        environment: Option<&str>,
        anthropic_api_key: Option<&str>,
        llm_model: Option<&str>,
        llm_base_url: Option<&str>,
        llm_max_tokens: Option<&str>,
        mongodb_uri: Option<&str>,
        mongodb_database: Option<&str>,
        auth_token_secret: Option<&str>,
    ) -> Self {
        let port = port.and_then(|v| v.parse().ok()).unwrap_or(8081);

        let sentry_dsn = sentry_dsn.filter(|s| !s.is_empty()).map(String::from);

        let environment = environment
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| "local".to_string());

        let anthropic_api_key = anthropic_api_key
            .filter(|s| !s.is_empty())
            .map(String::from);

        let llm_model = llm_model
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let llm_base_url = llm_base_url
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let llm_max_tokens = llm_max_tokens
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let mongodb_uri = mongodb_uri.filter(|s| !s.is_empty()).map(String::from);

        let mongodb_database = mongodb_database
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| "ideaforge".to_string());

        let auth_token_secret = auth_token_secret
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| DEV_TOKEN_SECRET.to_string());

        Config {
            port,
            sentry_dsn,
            environment,
            anthropic_api_key,
            llm_model,
            llm_base_url,
            llm_max_tokens,
            mongodb_uri,
            mongodb_database,
            auth_token_secret,
        }
    }
}
