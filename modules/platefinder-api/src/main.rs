use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use foursquare_client::FoursquareClient;
use llm_client::LlmClient;
use platefinder_api::{config::Config, router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("platefinder_api=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    if config.together_api_key.is_none() {
        warn!("TOGETHER_API_KEY is not set; LLM calls will fail upstream");
    }
    if config.foursquare_api_key.is_none() {
        warn!("FOURSQUARE_API_KEY is not set; searches will fail until it is configured");
    }

    let state = Arc::new(AppState {
        llm: LlmClient::new(config.together_api_key.unwrap_or_default()),
        places: FoursquareClient::new(config.foursquare_api_key),
        model: config.model,
    });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Platefinder API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
