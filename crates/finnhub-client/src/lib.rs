use lookup_core::{CompanyProfile, LookupError, Quote};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Client for the Finnhub quote and company-profile endpoints.
#[derive(Clone)]
pub struct FinnhubClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl FinnhubClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url: BASE_URL.to_string(),
            client,
        }
    }

    /// Override the API base URL (used by offline tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the current intraday quote for a symbol.
    ///
    /// Finnhub reports 0 for fields it has no data for; those are
    /// normalized to `None` so callers have a single notion of "missing".
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, LookupError> {
        let url = format!("{}/quote", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", &self.api_key)])
            .send()
            .await
            .map_err(|e| LookupError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let quote: QuoteResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ApiError(e.to_string()))?;

        tracing::debug!("Quote for {}: current={:?}", symbol, quote.c);

        Ok(Quote {
            current: nonzero(quote.c),
            open: nonzero(quote.o),
            high: nonzero(quote.h),
            low: nonzero(quote.l),
            prev_close: nonzero(quote.pc),
        })
    }

    /// Get the company profile (name and exchange) for a symbol.
    pub async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, LookupError> {
        let url = format!("{}/stock/profile2", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", &self.api_key)])
            .send()
            .await
            .map_err(|e| LookupError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ApiError(e.to_string()))?;

        Ok(CompanyProfile {
            name: profile.name.filter(|n| !n.is_empty()),
            exchange: profile.exchange.filter(|e| !e.is_empty()),
        })
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

// Response structures

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    c: Option<f64>,
    #[serde(default)]
    o: Option<f64>,
    #[serde(default)]
    h: Option<f64>,
    #[serde(default)]
    l: Option<f64>,
    #[serde(default)]
    pc: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    #[tokio::test]
    async fn quote_maps_fields_and_drops_zeroes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/quote")
                .query_param("symbol", "AAPL")
                .query_param("token", "k");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"c":150.0,"o":140.0,"h":155.0,"l":145.0,"pc":0}"#);
        });

        let client = FinnhubClient::new("k".to_string()).with_base_url(server.base_url());
        let quote = client.get_quote("AAPL").await.unwrap();

        mock.assert();
        assert_eq!(quote.current, Some(150.0));
        assert_eq!(quote.open, Some(140.0));
        assert_eq!(quote.high, Some(155.0));
        assert_eq!(quote.low, Some(145.0));
        assert_eq!(quote.prev_close, None);
    }

    #[tokio::test]
    async fn quote_http_error_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quote");
            then.status(401).body("Invalid API key");
        });

        let client = FinnhubClient::new("bad".to_string()).with_base_url(server.base_url());
        let err = client.get_quote("AAPL").await.unwrap_err();

        assert!(matches!(err, LookupError::ApiError(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn profile_empty_strings_become_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/profile2");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"name":"Apple Inc","exchange":""}"#);
        });

        let client = FinnhubClient::new("k".to_string()).with_base_url(server.base_url());
        let profile = client.get_profile("AAPL").await.unwrap();

        assert_eq!(profile.name.as_deref(), Some("Apple Inc"));
        assert_eq!(profile.exchange, None);
    }
}
