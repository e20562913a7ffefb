//! Standalone quote relay.
//!
//! A single stateless route that forwards a symbol query to the Yahoo
//! Finance quote endpoint and passes the JSON back, so callers blocked by
//! cross-origin restrictions can still reach it. No auth, no caching.

pub mod routes;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3001;
const YAHOO_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub upstream_url: String,
}

impl ProxyConfig {
    /// Read `PROXY_PORT` and `YAHOO_QUOTE_URL` from the environment,
    /// falling back to the defaults.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PROXY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            upstream_url: std::env::var("YAHOO_QUOTE_URL")
                .unwrap_or_else(|_| YAHOO_QUOTE_URL.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub upstream_url: String,
}

/// Build the proxy router. Cross-origin requests are allowed from any
/// caller.
pub fn app(config: &ProxyConfig) -> Router {
    let state = AppState {
        client: reqwest::Client::new(),
        upstream_url: config.upstream_url.clone(),
    };

    routes::quote_routes()
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Quote proxy listening on http://{}", addr);

    axum::serve(listener, app(&config)).await?;
    Ok(())
}
