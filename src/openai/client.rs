//! Thin client for the OpenAI Images API.
//!
//! - `generate_image` posts to `/images/generations` asking for one image and
//!   decodes the returned `b64_json` payload.
//! - The client owns the API key; it is set once at construction.
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::gateway::{GatewayError, GeneratedImage, ImageGateway};
use crate::room::OutputSize;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-image-1";

#[derive(Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'static str>,
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Option<Vec<ImageData>>,
}

#[derive(Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

#[derive(Deserialize)]
struct ErrorDetails {
    message: String,
}

#[derive(Clone)]
pub struct OpenAIImageClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAIImageClient {
    pub fn new(base_url: String, api_key: String, model: String, timeout: Duration) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        OpenAIImageClient { client: Client::new(), base_url: base, api_key, model, timeout }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request one image for `prompt`, bounded by the client's timeout.
    pub async fn generate_image(&self, prompt: &str, size: OutputSize) -> Result<GeneratedImage, GatewayError> {
        match tokio::time::timeout(self.timeout, self.request_image(prompt, size)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Image generation timed out");
                Err(GatewayError::Timeout(self.timeout))
            }
        }
    }

    async fn request_image(&self, prompt: &str, size: OutputSize) -> Result<GeneratedImage, GatewayError> {
        let url = format!("{}/images/generations", self.base_url);
        // dall-e models default to URLs; gpt-image models only return base64 and reject the field.
        let response_format = self.model.starts_with("dall-e").then_some("b64_json");
        let body = ImagesRequest { model: &self.model, prompt, n: 1, size: size.as_str(), response_format };

        tracing::info!(%url, model = %self.model, %size, "Requesting image from provider");
        tracing::debug!("Prompt: {}", prompt);

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(GatewayError::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());
            tracing::error!(status = status.as_u16(), %message, "Image provider rejected request");
            return Err(GatewayError::Provider { status: status.as_u16(), message });
        }

        let parsed: ImagesResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::MalformedPayload(e.to_string()))?;
        let b64 = parsed.data
            .into_iter()
            .flatten()
            .next()
            .and_then(|d| d.b64_json)
            .filter(|s| !s.is_empty())
            .ok_or(GatewayError::EmptyPayload)?;
        let bytes = STANDARD.decode(b64.as_bytes())
            .map_err(|e| GatewayError::MalformedPayload(format!("invalid base64 image data: {}", e)))?;

        tracing::info!(bytes = bytes.len(), "Received image from provider");
        Ok(GeneratedImage::png(bytes))
    }
}

#[async_trait]
impl ImageGateway for OpenAIImageClient {
    async fn generate(
        &self,
        prompt: &str,
        size: OutputSize,
        cancel: &CancellationToken,
    ) -> Result<GeneratedImage, GatewayError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Image generation cancelled by caller");
                Err(GatewayError::Cancelled)
            }
            result = self.generate_image(prompt, size) => result,
        }
    }
}
