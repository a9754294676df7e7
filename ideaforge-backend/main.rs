mod actions;
mod api;
mod auth;
mod config;
mod flows;
mod genai;
mod store;

use anyhow::Context;
use axum::body::Body;
use axum::extract::Request;
use clap::Parser;
use dotenvy::dotenv;
use sentry::integrations::tower::{NewSentryLayer, SentryHttpLayer};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::actions::Actions;
use crate::flows::ContentFlows;
use crate::genai::AnthropicClient;
use crate::store::events::LibraryEvent;
use crate::store::memory_repository::MemoryIdeaLibrary;
use crate::store::mongo_repository::MongoIdeaLibrary;
use crate::store::repository::IdeaLibrary;

#[derive(Parser)]
#[command(name = "ideaforge", about = "AI content idea generation service")]
struct Cli {
    /// Override the port from PORT / config
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let cli = Cli::parse();
    run_server(cli.port).await
}

async fn run_server(port_override: Option<u16>) -> Result<(), Box<dyn Error>> {
    let config = config::Config::from_env();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ideaforge=info,tower_http=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(false),
        )
        .with(sentry::integrations::tracing::layer().event_filter(
            |metadata| match *metadata.level() {
                tracing::Level::ERROR => sentry::integrations::tracing::EventFilter::Event,
                tracing::Level::WARN | tracing::Level::INFO => {
                    sentry::integrations::tracing::EventFilter::Breadcrumb
                }
                _ => sentry::integrations::tracing::EventFilter::Ignore,
            },
        ))
        .init();

    let _guard = sentry::init((
        config.sentry_dsn.clone().unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            send_default_pii: true,
            traces_sample_rate: 0.2,
            enable_logs: true,
            ..Default::default()
        },
    ));

    if config.auth_token_secret == config::DEV_TOKEN_SECRET {
        tracing::warn!("AUTH_TOKEN_SECRET not set — using the development signing secret");
    }

    // Generous read timeout: generation calls are slow, and the contract has
    // no per-request cancellation above this.
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(300))
        .build()
        .context("failed to build HTTP client")?;

    let api_key = config
        .anthropic_api_key
        .clone()
        .context("ANTHROPIC_API_KEY is required")?;
    let llm = Arc::new(AnthropicClient::new(
        http_client,
        config.llm_model.clone(),
        api_key,
        config.llm_base_url.clone(),
        config.llm_max_tokens,
    ));

    let library: Arc<dyn IdeaLibrary> = match &config.mongodb_uri {
        Some(uri) => Arc::new(
            MongoIdeaLibrary::connect(uri, &config.mongodb_database)
                .await
                .context("failed to initialize MongoDB idea library")?,
        ),
        None => {
            tracing::warn!("MONGODB_URI not set — saved ideas are kept in memory only");
            Arc::new(MemoryIdeaLibrary::new())
        }
    };

    let (library_events_tx, _) = tokio::sync::broadcast::channel::<LibraryEvent>(256);

    let app_state = api::AppState {
        actions: Arc::new(Actions::new(ContentFlows::new(llm))),
        library,
        library_events_tx,
        auth_secret: config.auth_token_secret.clone(),
    };

    let app = api::create_app(app_state)
        .layer(SentryHttpLayer::new().enable_transaction())
        .layer(NewSentryLayer::<Request<Body>>::new_from_top());

    let port = port_override.unwrap_or(config.port);
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("Listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
