//! stockchat server
//!
//! Answers stock-market questions over HTTP by letting a language model
//! pick from a fixed set of indicator functions, executing them against
//! Yahoo Finance, and returning the model's synthesized reply.
//!
//! ```bash
//! # Credential via env or a local API_KEY file
//! export OPENAI_API_KEY=sk-...
//! cargo run -p stockchat-server
//! ```

mod config;
mod error;
mod orchestrator;
mod routes;
mod state;

use anyhow::Context;
use axum::http::HeaderValue;
use std::env;
use std::sync::Arc;
use stockchat_llm::OpenAiClient;
use stockchat_market::tools::{EmaTool, MacdTool, PlotTool, RsiTool, SmaTool, StockPriceTool};
use stockchat_market::{ChartStore, MarketData, YahooMarketData};
use stockchat_tools::ToolRegistry;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::orchestrator::Orchestrator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| {
            "warn,stockchat_server=info,stockchat_market=info,stockchat_llm=info".to_string()
        }))
        .init();

    let config = Config::from_env()?;
    info!(addr = %config.listen_addr, model = %config.model, "Starting stockchat server");

    let charts = ChartStore::new(&config.chart_dir);
    charts.ensure_dir()?;

    // The model client and the market client share one configured deadline
    let data: Arc<dyn MarketData> = Arc::new(
        YahooMarketData::new()
            .with_timeout(std::time::Duration::from_secs(config.llm.timeout_secs)),
    );
    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(StockPriceTool::new(Arc::clone(&data))));
    registry.register(Arc::new(SmaTool::new(Arc::clone(&data))));
    registry.register(Arc::new(EmaTool::new(Arc::clone(&data))));
    registry.register(Arc::new(RsiTool::new(Arc::clone(&data))));
    registry.register(Arc::new(MacdTool::new(Arc::clone(&data))));
    registry.register(Arc::new(PlotTool::new(Arc::clone(&data), charts.clone())));
    info!(tools = registry.len(), "Tool registry ready");

    let client = Arc::new(OpenAiClient::with_config(config.llm.clone())?);
    let orchestrator = Arc::new(Orchestrator::new(
        client,
        Arc::clone(&registry),
        config.model.clone(),
    ));

    let state = AppState::new(orchestrator, charts);
    let app = routes::router()
        .layer(cors_layer(&config.allowed_origins)?)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "stockchat server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {o:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
