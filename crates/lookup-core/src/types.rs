use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Intraday quote for a symbol. Fields the upstream API reports as 0
/// (its "unknown" marker) are normalized to `None` by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    pub current: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub prev_close: Option<f64>,
}

/// Company identity data for a symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub exchange: Option<String>,
}

/// A single news article with optional sentiment polarity in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub date: Option<DateTime<Utc>>,
    pub polarity: Option<f64>,
}

/// Three-way sentiment classification of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a polarity value. Thresholds are fixed at +/-0.1; an absent
    /// polarity is Neutral.
    pub fn from_polarity(polarity: Option<f64>) -> Self {
        match polarity {
            Some(p) if p > 0.1 => SentimentLabel::Positive,
            Some(p) if p < -0.1 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }

    /// Accent color used when rendering the label.
    pub fn color(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "#43e97b",
            SentimentLabel::Neutral => "#2196f3",
            SentimentLabel::Negative => "#e53935",
        }
    }
}

/// Aggregated lookup result for one symbol, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReport {
    pub ticker: String,
    pub company_name: String,
    pub exchange: Option<String>,
    pub quote: Quote,
    /// Most recent articles, capped at 5 in upstream order.
    pub news: Vec<NewsItem>,
    pub score: u8,
}
