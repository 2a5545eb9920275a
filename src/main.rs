mod error;
mod explain;
mod llm;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use llm::{ChatModel, LlmClient, LlmConfig};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load env
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = LlmConfig::from_env();
    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    // Init LLM client
    let llm_client = LlmClient::new(config)?;
    if llm_client.is_configured() {
        info!(model = llm_client.model(), "LLM client initialized");
    } else {
        warn!("LOVABLE_API_KEY is not set; requests will fail until it is configured");
    }

    let app = routes::router(AppState::new(Arc::new(llm_client)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
