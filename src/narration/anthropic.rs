use super::prompt::COMPASS_SYSTEM_PROMPT;
use super::{NarrationRequest, Narrator};
use crate::config::AppConfig;
use crate::errors::{CompassError, CompassResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client. All methods return Result, never panic.
#[derive(Clone)]
pub struct AnthropicNarrator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicNarrator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.narration_timeout_secs))
                .pool_max_idle_per_host(4)
                .build()
                .unwrap_or_default(),
            base_url: config.anthropic_base_url.trim_end_matches('/').to_string(),
            api_key: config.anthropic_api_key.clone(),
            model: config.narration_model.clone(),
            max_tokens: config.narration_max_tokens,
        }
    }

    fn build_body<'a>(&'a self, payload: String) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: COMPASS_SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: payload,
            }],
        }
    }
}

#[async_trait::async_trait]
impl Narrator for AnthropicNarrator {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn narrate(&self, request: &NarrationRequest<'_>) -> CompassResult<String> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_body(serde_json::to_string(request)?);

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompassError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        decode_text(&bytes)
    }
}

// ── Wire types ──

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Option<Vec<ContentBlock>>,
    #[allow(dead_code)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Pull the narration text out of a 2xx response body. An envelope that
/// does not decode carries no usable text either.
fn decode_text(bytes: &[u8]) -> CompassResult<String> {
    let data: MessagesResponse = serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!(error = %e, "undecodable messages response");
        CompassError::NarrationUnavailable
    })?;
    first_text(data).ok_or(CompassError::NarrationUnavailable)
}

/// First text block with non-blank content.
fn first_text(resp: MessagesResponse) -> Option<String> {
    resp.content?
        .into_iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text)
        .find(|t| !t.trim().is_empty())
}
