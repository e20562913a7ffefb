use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub symbol: Option<String>,
}

pub fn quote_routes() -> Router<AppState> {
    Router::new().route("/quote", get(relay_quote))
}

/// Forward the symbol to the upstream quote endpoint and relay its JSON
/// verbatim. Missing symbol is the caller's fault (400); anything that
/// goes wrong upstream collapses into a generic 500.
async fn relay_quote(State(state): State<AppState>, Query(query): Query<QuoteQuery>) -> Response {
    let symbol = match query.symbol.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing symbol parameter"})),
            )
                .into_response();
        }
    };

    match fetch_upstream(&state, &symbol).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::warn!("Upstream quote fetch for {} failed: {}", symbol, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to fetch from Yahoo"})),
            )
                .into_response()
        }
    }
}

async fn fetch_upstream(state: &AppState, symbol: &str) -> Result<Value, reqwest::Error> {
    state
        .client
        .get(&state.upstream_url)
        .query(&[("symbols", symbol)])
        .send()
        .await?
        .json::<Value>()
        .await
}
