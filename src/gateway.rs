//! The seam between request handling and whatever produces images.
//!
//! Handlers only see [`ImageGateway`]; the OpenAI client is one implementation
//! and tests substitute their own.
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::room::OutputSize;

/// Decoded image bytes plus the MIME type they were requested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        GeneratedImage { bytes, mime_type: "image/png".to_string() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Could not reach the image provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Image provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("The image provider returned no image")]
    EmptyPayload,

    #[error("Malformed response from the image provider: {0}")]
    MalformedPayload(String),

    #[error("Image generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Image generation was cancelled")]
    Cancelled,
}

/// Produces exactly one image per call. Implementations make a single attempt
/// and return promptly with `GatewayError::Cancelled` once `cancel` fires.
#[async_trait]
pub trait ImageGateway: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        size: OutputSize,
        cancel: &CancellationToken,
    ) -> Result<GeneratedImage, GatewayError>;
}
