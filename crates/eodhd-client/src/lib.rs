use chrono::{DateTime, Utc};
use lookup_core::{LookupError, NewsItem};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://eodhd.com";

/// Client for the EODHD financial news endpoint.
#[derive(Clone)]
pub struct EodhdClient {
    api_token: String,
    base_url: String,
    client: Client,
}

impl EodhdClient {
    pub fn new(api_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_token,
            base_url: BASE_URL.to_string(),
            client,
        }
    }

    /// Override the API base URL (used by offline tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get recent news articles for a symbol, newest first as returned
    /// upstream. Dates that fail to parse and absent sentiment blocks
    /// become `None` on the item.
    pub async fn get_news(&self, symbol: &str, limit: u32) -> Result<Vec<NewsItem>, LookupError> {
        let url = format!("{}/api/news", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("s", symbol),
                ("api_token", &self.api_token),
                ("limit", &limit.to_string()),
            ])
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

        let articles: Vec<NewsArticle> = response
            .json()
            .await
            .map_err(|e| LookupError::ApiError(e.to_string()))?;

        tracing::debug!("Fetched {} news articles for {}", articles.len(), symbol);

        Ok(articles
            .into_iter()
            .map(|a| NewsItem {
                title: a.title,
                link: a.link,
                date: a.date.as_deref().and_then(parse_date),
                polarity: a.sentiment.and_then(|s| s.polarity),
            })
            .collect())
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

// Response structures

#[derive(Debug, Deserialize)]
struct NewsArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    sentiment: Option<Sentiment>,
}

#[derive(Debug, Deserialize)]
struct Sentiment {
    #[serde(default)]
    polarity: Option<f64>,
}
