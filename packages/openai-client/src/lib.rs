//! Pure OpenAI Images REST API client
//!
//! A minimal client for the OpenAI image generation endpoint with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ImageRequest, OpenAIClient};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! let image = client
//!     .generate_image(ImageRequest::new("dall-e-3", "a red barn at dusk").size("1024x1024"))
//!     .await?;
//!
//! std::fs::write("barn.png", &image.bytes)?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use base64::Engine;
use reqwest::Client;
use tracing::{debug, warn};

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw image generation call.
    pub async fn create_image(&self, request: &ImageRequest) -> Result<ImageResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI image request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);
            warn!(status = %status, error = %message, "OpenAI images API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let image_response: ImageResponse = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        debug!(
            model = %request.model,
            images = image_response.data.len(),
            duration_ms = start.elapsed().as_millis(),
            "OpenAI image generation"
        );

        Ok(image_response)
    }

    /// Generate one image and return its decoded bytes.
    ///
    /// Forces `response_format = "b64_json"` so the caller never has to
    /// download from a short-lived URL.
    pub async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage> {
        let request = request.b64_json();
        let response = self.create_image(&request).await?;

        let data = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| OpenAIError::Parse("No image in OpenAI response".into()))?;

        let encoded = data
            .b64_json
            .ok_or_else(|| OpenAIError::Parse("Response missing b64_json".into()))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| OpenAIError::Decode(e.to_string()))?;

        Ok(GeneratedImage {
            mime_type: sniff_mime_type(&bytes).to_string(),
            bytes,
            revised_prompt: data.revised_prompt,
        })
    }
}

/// Detect the image format from its magic bytes. Defaults to PNG, which is
/// what the Images API returns.
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/png",
    }
}
