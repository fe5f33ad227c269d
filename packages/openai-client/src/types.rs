//! OpenAI Images API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Image Generation
// =============================================================================

/// Image generation request (`POST /images/generations`).
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    /// Model to use (e.g., "dall-e-3", "gpt-image-1")
    pub model: String,

    /// Text description of the desired image
    pub prompt: String,

    /// Number of images (dall-e-3 only supports 1)
    pub n: u32,

    /// Output resolution, e.g. "1024x1024"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// "url" or "b64_json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            prompt: String::new(),
            n: 1,
            size: None,
            response_format: None,
        }
    }
}

impl ImageRequest {
    /// Create a new image request for the given model and prompt.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set output size.
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Ask for the image inline as base64 instead of a temporary URL.
    pub fn b64_json(mut self) -> Self {
        self.response_format = Some("b64_json".to_string());
        self
    }
}

/// Image generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    pub created: i64,
    pub data: Vec<ImageData>,
}

/// A single generated image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    /// Present when `response_format` is "b64_json"
    #[serde(default)]
    pub b64_json: Option<String>,

    /// Present when `response_format` is "url" (expires after an hour)
    #[serde(default)]
    pub url: Option<String>,

    /// dall-e-3 rewrites prompts before generating
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

/// Decoded image bytes.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub revised_prompt: Option<String>,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: String,
}
