use std::fmt;

use async_trait::async_trait;
use parley_core::{CompletionOptions, CompletionProvider, DEFAULT_MODEL, GatewayError};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com/v1";

/// Cohere chat client issuing exactly one request per completion.
#[derive(Clone)]
pub struct CohereProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for CohereProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CohereProvider")
            .field("base_url", &self.base_url)
            .field("has_api_key", &!self.api_key.is_empty())
            .finish_non_exhaustive()
    }
}

impl CohereProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating CohereProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(prompt: &str, options: &CompletionOptions) -> Value {
        json!({
            "model": options.model,
            "message": prompt,
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        })
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::new(format!("invalid response format: {e}")))?;

        reply_text(&body)
    }
}

/// Extract the completion text from a chat response body.
fn reply_text(body: &Value) -> Result<String, GatewayError> {
    body["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GatewayError::new("invalid response format: missing text"))
}

/// Describe a non-success HTTP reply, preferring the service's own message.
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    let detail = if detail.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        detail
    };

    GatewayError::new(format!("status {}: {detail}", status.as_u16()))
}

#[async_trait]
impl CompletionProvider for CohereProvider {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GatewayError> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::new("missing API key"));
        }

        let request = Self::build_request(prompt, options);

        info!(
            "Sending request to Cohere API: model={}, max_tokens={}",
            options.model, options.max_tokens
        );

        match self.try_send(&request).await {
            Ok(text) => {
                info!("Received response from Cohere API");
                Ok(text)
            }
            Err(e) => {
                warn!("Cohere request failed: {e}");
                Err(e)
            }
        }
    }

    fn get_default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }
}
