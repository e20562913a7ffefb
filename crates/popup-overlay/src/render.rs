//! HTML builders for the overlay card states.
//!
//! The markup mirrors a small fixed card: company name, ticker and
//! exchange, the five quote fields, a score badge, and up to five news
//! entries with a color-coded sentiment label.

use lookup_core::{NewsItem, SentimentLabel, StockReport};
use std::fmt::Write;

/// Loading state shown while the ticker is being resolved.
pub fn render_loading() -> String {
    r#"<div class="popup-card"><div class="company-name">Identifying ticker...</div></div>"#
        .to_string()
}

/// Shown when no ticker could be determined for the selection.
pub fn render_unresolved(selection: &str) -> String {
    format!(
        r#"<div class="popup-card"><div>Could not identify a valid ticker for "{}".</div></div>"#,
        escape(selection)
    )
}

/// Shown when any of the market-data fetches failed.
pub fn render_fetch_error(ticker: &str, error: &str) -> String {
    format!(
        r#"<div class="popup-card"><div>Error fetching data for "<b>{}</b>": {}</div></div>"#,
        escape(ticker),
        escape(error)
    )
}

/// The full data view for a successful lookup.
pub fn render_report(report: &StockReport) -> String {
    let exchange = match &report.exchange {
        Some(exchange) => format!(
            r#"<span class="exchange">({})</span>"#,
            escape(exchange)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="popup-card">
  <span class="close-btn" title="Close">&times;</span>
  <div class="company-name">{name}</div>
  <div class="ticker-exchange"><span class="ticker">{ticker}</span>{exchange}</div>
  <div class="stock-details">
    <div><strong>Current Price:</strong> {current}</div>
    <div><strong>Open:</strong> {open}</div>
    <div><strong>High:</strong> {high}</div>
    <div><strong>Low:</strong> {low}</div>
    <div><strong>Previous Close:</strong> {prev_close}</div>
  </div>
  <button class="score-btn">Score: {score}/100</button>
  <div class="news-section">{news}</div>
</div>"#,
        name = escape(&report.company_name),
        ticker = escape(&report.ticker),
        exchange = exchange,
        current = field(report.quote.current),
        open = field(report.quote.open),
        high = field(report.quote.high),
        low = field(report.quote.low),
        prev_close = field(report.quote.prev_close),
        score = report.score,
        news = render_news(&report.news),
    )
}

fn render_news(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<div class="news-header">Latest News</div>"#);
    for item in news.iter().take(5) {
        let label = SentimentLabel::from_polarity(item.polarity);
        let date = item
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = write!(
            html,
            r#"<div class="news-item" style="border-left: 5px solid {color};"><a href="{link}"><div class="news-title">{title}</div><div class="news-sentiment" style="color:{color};">{label}</div><div class="news-date">{date}</div></a></div>"#,
            color = label.color(),
            link = escape(&item.link),
            title = escape(&item.title),
            label = label.as_str(),
            date = date,
        );
    }
    html
}

fn field(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
