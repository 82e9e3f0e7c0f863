//! Description generator backed by the Anthropic Messages API.
//!
//! Every failure (missing key, transport, non-success status, unexpected
//! body, empty text) surfaces as `Error::Generation` so callers can fall back
//! to a manual description.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::{mlog_debug, mlog_warn, Error, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DescriptionGenerator {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
    api_key_env: String,
    api_key: Option<String>,
}

impl DescriptionGenerator {
    /// Build from config, reading the API key from its environment variable
    /// once. A missing or blank key is not an error here; it fails each
    /// `generate` call instead.
    pub fn from_config(config: &Config) -> Self {
        let api_key_env = config.effective_api_key_env().to_string();
        let api_key = std::env::var(&api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            http: reqwest::Client::new(),
            endpoint: config.effective_api_url().to_string(),
            model: config.effective_model().to_string(),
            max_tokens: config.effective_max_tokens(),
            timeout: config.generation_timeout(),
            api_key_env,
            api_key,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Produce a short description of `command`.
    pub async fn generate(&self, command: &str) -> Result<String> {
        let Some(key) = &self.api_key else {
            return Err(Error::Generation(format!(
                "{} environment variable not set",
                self.api_key_env
            )));
        };

        let url = format!("{}/v1/messages", self.endpoint.trim_end_matches('/'));
        mlog_debug!("generate: POST {} model={}", url, self.model);

        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body(&self.model, self.max_tokens, command))
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !status.is_success() {
            mlog_warn!("generate: API returned {}: {}", status, text);
            return Err(Error::Generation(format!("API error {status}: {text}")));
        }

        parse_description(&text)
    }
}

pub fn build_prompt(command: &str) -> String {
    format!(
        "Generate a very short (5-10 words max) description of what this command does: {command}\n\n\
         Respond with ONLY the description, no explanation or additional text."
    )
}

fn request_body(model: &str, max_tokens: u32, command: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [
            {"role": "user", "content": build_prompt(command)}
        ],
    })
}

/// Pull the first text block out of a Messages API response body.
pub fn parse_description(body: &str) -> Result<String> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| Error::Generation(format!("unexpected response: {e}")))?;

    let text = response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::Generation("empty description".to_string()));
    }
    Ok(text)
}
