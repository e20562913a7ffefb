//! Resolves free-form selected text to a stock ticker symbol by asking an
//! LLM chat-completion endpoint.
//!
//! The model is instructed to answer with a bare symbol (exchange suffix
//! included where relevant) or the sentinel `UNKNOWN`. Any transport or
//! parse failure is an `Err`; callers treat that the same as `Ok(None)`.

pub mod error;

pub use error::{ResolveError, ResolveResult};

use serde::{Deserialize, Serialize};
use std::time::Duration;

const NOT_FOUND_SENTINEL: &str = "UNKNOWN";

/// Configuration for the completion service.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResolverConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "openai/gpt-3.5-turbo".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Clone)]
pub struct TickerResolver {
    client: reqwest::Client,
    config: ResolverConfig,
}

impl TickerResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Resolve selected text to a ticker symbol.
    ///
    /// Returns `Ok(None)` when the model answers with the not-found
    /// sentinel or an empty reply. One request, no retry.
    pub async fn resolve(&self, selection: &str) -> ResolveResult<Option<String>> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: build_prompt(selection),
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolveError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let completion = response.json::<CompletionResponse>().await?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ResolveError::InvalidResponse("no choices in reply".to_string()))?;

        Ok(extract_ticker(&reply))
    }
}

fn build_prompt(selection: &str) -> String {
    format!(
        "Given the following text, return only the most likely stock ticker symbol \
         (with exchange suffix if relevant, e.g., .US for Nasdaq/NYSE, .NS for NSE, \
         .L for LSE, etc.) for the company or stock mentioned. If you cannot \
         determine, reply \"{NOT_FOUND_SENTINEL}\". Text: \"{selection}\""
    )
}

/// Extract the symbol from a model reply.
///
/// Takes the first whitespace- or comma-delimited token, strips trailing
/// sentence punctuation, and uppercases it. Embedded exchange suffixes
/// like `.US` are preserved.
fn extract_ticker(reply: &str) -> Option<String> {
    let reply = reply.trim();
    if reply.is_empty() || reply.eq_ignore_ascii_case(NOT_FOUND_SENTINEL) {
        return None;
    }

    let token = reply
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default()
        .trim_end_matches(['.', ','])
        .to_uppercase();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

// Wire structures

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}
