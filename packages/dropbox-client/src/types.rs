use serde::{Deserialize, Serialize};

/// Argument for `files/upload`, sent in the `Dropbox-API-Arg` header.
#[derive(Debug, Clone, Serialize)]
pub struct UploadArg {
    pub path: String,
    pub mode: WriteMode,
    pub autorename: bool,
    pub mute: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    Add,
    Overwrite,
}

/// Metadata returned after an upload.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    pub path_display: Option<String>,
    pub path_lower: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSharedLinkArg {
    pub path: String,
    pub settings: SharedLinkSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct SharedLinkSettings {
    pub requested_visibility: String,
}

impl Default for SharedLinkSettings {
    fn default() -> Self {
        Self {
            requested_visibility: "public".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSharedLinksArg {
    pub path: String,
    pub direct_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListSharedLinksResult {
    pub links: Vec<SharedLinkMetadata>,
    #[serde(default)]
    pub has_more: bool,
}

/// A shared link (file or folder).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SharedLinkMetadata {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path_lower: Option<String>,
}

/// Error envelope for 409 responses.
///
/// ```json
/// {
///   "error_summary": "shared_link_already_exists/metadata/..",
///   "error": {
///     ".tag": "shared_link_already_exists",
///     "shared_link_already_exists": { ".tag": "metadata", "metadata": { "url": "..." } }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error_summary: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn is_shared_link_already_exists(&self) -> bool {
        self.error_summary.starts_with("shared_link_already_exists")
    }

    pub fn existing_link(&self) -> Option<SharedLinkMetadata> {
        let metadata = self
            .error
            .as_ref()?
            .get("shared_link_already_exists")?
            .get("metadata")?
            .clone();
        serde_json::from_value(metadata).ok()
    }
}
