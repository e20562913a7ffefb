use eodhd_client::EodhdClient;
use finnhub_client::FinnhubClient;
use lookup_core::{heuristic_score, LookupError, StockReport};
use ticker_resolver::{ResolverConfig, TickerResolver};

pub mod dispatch;
pub use dispatch::{spawn_lookup_worker, SelectionDispatcher, SelectionEvent};

/// Articles shown in the overlay.
const NEWS_LIMIT: u32 = 5;

/// API credentials and endpoint overrides, passed in explicitly at
/// startup rather than read ambiently by the clients.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub openrouter_api_key: String,
    pub finnhub_api_key: String,
    pub eodhd_api_key: String,
    /// Completion model used for ticker resolution.
    pub model: Option<String>,
}

impl LookupConfig {
    /// Build from `OPENROUTER_API_KEY`, `FINNHUB_API_KEY`, `EODHD_API_KEY`
    /// (all required) and the optional `RESOLVER_MODEL`.
    pub fn from_env() -> Result<Self, LookupError> {
        Ok(Self {
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            finnhub_api_key: require_env("FINNHUB_API_KEY")?,
            eodhd_api_key: require_env("EODHD_API_KEY")?,
            model: std::env::var("RESOLVER_MODEL").ok(),
        })
    }
}

fn require_env(key: &str) -> Result<String, LookupError> {
    std::env::var(key).map_err(|_| LookupError::InvalidData(format!("{key} is not set")))
}

/// Resolves a selection to a ticker and aggregates its market data.
pub struct LookupOrchestrator {
    resolver: TickerResolver,
    finnhub: FinnhubClient,
    eodhd: EodhdClient,
}

impl LookupOrchestrator {
    pub fn new(config: LookupConfig) -> Self {
        let mut resolver_config = ResolverConfig::new(config.openrouter_api_key);
        if let Some(model) = config.model {
            resolver_config = resolver_config.with_model(model);
        }

        Self {
            resolver: TickerResolver::new(resolver_config),
            finnhub: FinnhubClient::new(config.finnhub_api_key),
            eodhd: EodhdClient::new(config.eodhd_api_key),
        }
    }

    /// Assemble from pre-built clients (tests point these at mock servers).
    pub fn from_parts(
        resolver: TickerResolver,
        finnhub: FinnhubClient,
        eodhd: EodhdClient,
    ) -> Self {
        Self {
            resolver,
            finnhub,
            eodhd,
        }
    }

    /// Resolve selected text to a ticker symbol.
    ///
    /// Resolution failures collapse into `None`: the user sees the same
    /// "could not identify" message whether the model answered with the
    /// not-found sentinel or the request itself failed. No retry.
    pub async fn resolve_ticker(&self, selection: &str) -> Option<String> {
        match self.resolver.resolve(selection).await {
            Ok(ticker) => ticker,
            Err(e) => {
                tracing::warn!("Ticker resolution failed: {}", e);
                None
            }
        }
    }

    /// Fetch quote, profile and news for a ticker concurrently and build
    /// the report.
    ///
    /// The fan-out fails as a unit: the first rejection aborts the whole
    /// lookup, and a quote with no current price is treated as "symbol has
    /// no data". No partial reports.
    pub async fn fetch_report(&self, ticker: &str) -> Result<StockReport, LookupError> {
        tracing::info!("Fetching market data for {}", ticker);

        let (quote, profile, mut news) = tokio::try_join!(
            self.finnhub.get_quote(ticker),
            self.finnhub.get_profile(ticker),
            self.eodhd.get_news(ticker, NEWS_LIMIT),
        )?;

        if quote.current.is_none() {
            return Err(LookupError::NoData(ticker.to_string()));
        }

        news.truncate(NEWS_LIMIT as usize);
        let score = heuristic_score(&quote);

        Ok(StockReport {
            ticker: ticker.to_string(),
            company_name: profile.name.unwrap_or_else(|| ticker.to_string()),
            exchange: profile.exchange,
            quote,
            news,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    fn orchestrator_for(server: &MockServer) -> LookupOrchestrator {
        LookupOrchestrator::from_parts(
            TickerResolver::new(
                ResolverConfig::new("k".to_string()).with_base_url(server.base_url()),
            ),
            FinnhubClient::new("k".to_string()).with_base_url(server.base_url()),
            EodhdClient::new("k".to_string()).with_base_url(server.base_url()),
        )
    }

    fn mock_profile_and_news(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/stock/profile2");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"name":"Apple Inc","exchange":"NASDAQ"}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/news");
            then.status(200)
                .header("content-type", "application/json")
                .body("[]");
        });
    }

    #[tokio::test]
    async fn report_aggregates_quote_profile_and_news() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quote");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"c":150.0,"o":140.0,"h":155.0,"l":145.0,"pc":148.0}"#);
        });
        mock_profile_and_news(&server);

        let report = orchestrator_for(&server).fetch_report("AAPL").await.unwrap();

        assert_eq!(report.company_name, "Apple Inc");
        assert_eq!(report.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(report.quote.current, Some(150.0));
        assert_eq!(report.score, 90);
    }

    #[tokio::test]
    async fn zero_current_price_is_no_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quote");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"c":0,"o":0,"h":0,"l":0,"pc":0}"#);
        });
        mock_profile_and_news(&server);

        let err = orchestrator_for(&server)
            .fetch_report("NOPE")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NoData(_)));
        assert!(err.to_string().contains("NOPE"));
    }

    #[tokio::test]
    async fn any_failed_fetch_fails_the_whole_lookup() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quote");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"c":150.0,"o":140.0,"h":155.0,"l":145.0,"pc":148.0}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/stock/profile2");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"name":"Apple Inc","exchange":"NASDAQ"}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/news");
            then.status(503).body("news service down");
        });

        let err = orchestrator_for(&server)
            .fetch_report("AAPL")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::ApiError(_)));
    }

    #[tokio::test]
    async fn resolver_failure_collapses_to_unresolved() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/chat/completions");
            then.status(500).body("boom");
        });

        let ticker = orchestrator_for(&server)
            .resolve_ticker("Apple Inc is surging")
            .await;

        assert_eq!(ticker, None);
    }
}
