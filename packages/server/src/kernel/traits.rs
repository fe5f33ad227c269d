// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The batch loop in domains/images/activities drives them.
//
// Naming convention: Base* for trait names (e.g., BaseImageGenerator)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::ImageBatchId;
use crate::domains::images::models::{Image, ImageBatch};

// =============================================================================
// Image payloads
// =============================================================================

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// File extension for the MIME type (png when unknown).
    pub fn extension(&self) -> &'static str {
        extension_for_mime(&self.mime_type)
    }
}

pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        _ => "png",
    }
}

/// Outcome of a generation call. Real output and placeholder output are kept
/// apart so callers can tell what they actually stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Generated(ImagePayload),
    Fallback { payload: ImagePayload, reason: String },
}

impl Generation {
    pub fn payload(&self) -> &ImagePayload {
        match self {
            Generation::Generated(payload) => payload,
            Generation::Fallback { payload, .. } => payload,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generation::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Generation::Generated(_) => None,
            Generation::Fallback { reason, .. } => Some(reason),
        }
    }
}

// =============================================================================
// Image Generation Trait
// =============================================================================

#[async_trait]
pub trait BaseImageGenerator: Send + Sync {
    /// Generate an image for a non-empty prompt.
    async fn generate(&self, prompt: &str) -> Result<Generation>;
}

// =============================================================================
// Storage Backend Trait
// =============================================================================

/// A file handed to storage or WordPress.
#[derive(Debug, Clone, Copy)]
pub struct UploadFile<'a> {
    pub bytes: &'a [u8],
    /// Name from the spreadsheet, without extension handling applied
    pub file_name: &'a str,
    pub mime_type: &'a str,
}

#[async_trait]
pub trait BaseStorageBackend: Send + Sync {
    /// Store the file and return a publicly resolvable URL.
    async fn upload(&self, file: &UploadFile<'_>) -> Result<String>;
}

// =============================================================================
// Publisher Trait (WordPress)
// =============================================================================

/// A complete WordPress target. Built only from credentials that carry a
/// site URL, a username and a password.
#[derive(Clone, PartialEq, Eq)]
pub struct WpTarget {
    pub site_url: String,
    pub username: String,
    /// Application password when one was given, else the account password
    pub password: String,
    pub post_id: Option<i64>,
    /// Custom field to set instead of the featured image
    pub mapping_key: Option<String>,
}

impl std::fmt::Debug for WpTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WpTarget")
            .field("site_url", &self.site_url)
            .field("username", &self.username)
            .field("post_id", &self.post_id)
            .field("mapping_key", &self.mapping_key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub media_id: i64,
    /// Set when a post was updated
    pub post_id: Option<i64>,
}

#[async_trait]
pub trait BasePublisher: Send + Sync {
    /// Authenticate, upload the media item, then attach it to the target post.
    async fn publish(&self, target: &WpTarget, file: &UploadFile<'_>) -> Result<PublishReceipt>;
}

// =============================================================================
// Image Store Trait (Persistence)
// =============================================================================

#[async_trait]
pub trait BaseImageStore: Send + Sync {
    /// Connectivity check for /health.
    async fn ping(&self) -> Result<()>;

    async fn create_batch(&self, note: &str) -> Result<ImageBatch>;

    async fn create_image(&self, batch_id: ImageBatchId, img_url: &str) -> Result<Image>;

    async fn find_batch(&self, id: ImageBatchId) -> Result<Option<ImageBatch>>;

    async fn find_recent_batches(&self, limit: i64) -> Result<Vec<ImageBatch>>;

    async fn find_images(&self, batch_id: ImageBatchId) -> Result<Vec<Image>>;
}
