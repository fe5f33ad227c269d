//! Image generators: OpenAI with placeholder fallback, and stand-ins for the
//! models without a working integration.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{ImageRequest, OpenAIClient};
use tracing::{debug, warn};

use super::placeholder::render_placeholder;
use super::{BaseImageGenerator, Generation, ImagePayload};

/// Wrap a prompt in the photographic style template.
pub fn photographic_prompt(prompt: &str) -> String {
    format!(
        "Create a photographic image: {}. Photorealistic, high quality, no text, no watermark.",
        prompt
    )
}

// =============================================================================
// OpenAI
// =============================================================================

/// OpenAI Images generator. Never fails: any error from the API (or a missing
/// key) produces a placeholder so the row can still complete.
pub struct OpenAIImageGenerator {
    client: Option<OpenAIClient>,
    model: String,
    size: String,
}

impl OpenAIImageGenerator {
    pub fn new(client: Option<OpenAIClient>, model: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            size: size.into(),
        }
    }

    fn fallback(prompt: &str, reason: String) -> Result<Generation> {
        Ok(Generation::Fallback {
            payload: render_placeholder("OpenAI (placeholder)", prompt)?,
            reason,
        })
    }
}

#[async_trait]
impl BaseImageGenerator for OpenAIImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        let Some(client) = &self.client else {
            return Self::fallback(prompt, "OPENAI_API_KEY not configured".to_string());
        };

        let request = ImageRequest::new(&self.model, photographic_prompt(prompt)).size(&self.size);

        match client.generate_image(request).await {
            Ok(image) => {
                debug!(
                    model = %self.model,
                    bytes = image.bytes.len(),
                    revised_prompt = ?image.revised_prompt,
                    "Generated image"
                );
                Ok(Generation::Generated(ImagePayload::new(image.bytes, image.mime_type)))
            }
            Err(e) => {
                warn!(model = %self.model, error = %e, "OpenAI generation failed, using placeholder");
                Self::fallback(prompt, e.to_string())
            }
        }
    }
}

// =============================================================================
// Stand-ins (Midjourney, Gemini)
// =============================================================================

/// A model without a working integration. Waits to mimic a network call and
/// returns a labelled placeholder.
pub struct StubImageGenerator {
    label: &'static str,
    latency: Duration,
}

impl StubImageGenerator {
    pub fn midjourney(latency: Duration) -> Self {
        Self {
            label: "Midjourney",
            latency,
        }
    }

    pub fn gemini(latency: Duration) -> Self {
        Self {
            label: "Gemini",
            latency,
        }
    }
}

#[async_trait]
impl BaseImageGenerator for StubImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(Generation::Fallback {
            payload: render_placeholder(self.label, prompt)?,
            reason: format!("{} integration not available; rendered placeholder", self.label),
        })
    }
}
