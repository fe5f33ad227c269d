//! `POST /generate` request body.

use serde::Deserialize;

use crate::kernel::WpTarget;

/// Body of a publish request. Field names match the dashboard's JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Kept as raw JSON so one malformed row does not reject the whole body.
    #[serde(default)]
    pub spreadsheet_data: Vec<serde_json::Value>,
    pub ai_model: AiModel,
    pub storage_service: StorageService,
    #[serde(default)]
    pub wp_credentials: Option<WpCredentials>,
}

/// Image generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AiModel {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "midjourney")]
    Midjourney,
    #[serde(rename = "gemini")]
    Gemini,
}

impl std::fmt::Display for AiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiModel::OpenAi => write!(f, "openai"),
            AiModel::Midjourney => write!(f, "midjourney"),
            AiModel::Gemini => write!(f, "gemini"),
        }
    }
}

/// Storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StorageService {
    #[serde(rename = "google_drive")]
    GoogleDrive,
    #[serde(rename = "dropbox")]
    Dropbox,
    #[serde(rename = "amazon_s3")]
    AmazonS3,
}

impl std::fmt::Display for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageService::GoogleDrive => write!(f, "google_drive"),
            StorageService::Dropbox => write!(f, "dropbox"),
            StorageService::AmazonS3 => write!(f, "amazon_s3"),
        }
    }
}

/// One spreadsheet row as submitted. Both keys must be present for the row
/// to count as valid; see `activities::validate_rows`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "actual_prompt_for_image_generating_ai_tool")]
    pub prompt: Option<String>,
    pub file_name: Option<String>,
}

/// A row that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetRow {
    /// Position in the submitted list
    pub index: usize,
    pub prompt: String,
    pub file_name: String,
}

/// WordPress target as submitted. Nothing here is persisted.
#[derive(Clone, Default, Deserialize)]
pub struct WpCredentials {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub application_password: Option<String>,
    #[serde(default)]
    pub post_id: Option<PostIdInput>,
    #[serde(default)]
    pub mapping_key: Option<String>,
}

impl std::fmt::Debug for WpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WpCredentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "application_password",
                &self.application_password.as_ref().map(|_| "<redacted>"),
            )
            .field("post_id", &self.post_id)
            .field("mapping_key", &self.mapping_key)
            .finish()
    }
}

/// Post ids arrive as numbers or numeric strings depending on the form.
/// Anything else is kept so a bad id never rejects the whole request.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostIdInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl PostIdInput {
    pub fn as_id(&self) -> Option<i64> {
        match self {
            PostIdInput::Number(n) if *n > 0 => Some(*n),
            PostIdInput::Number(_) => None,
            PostIdInput::Text(s) => s.trim().parse().ok().filter(|n: &i64| *n > 0),
            // Spreadsheet exports sometimes turn 42 into 42.0
            PostIdInput::Other(value) => value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f < i64::MAX as f64)
                .map(|f| f as i64),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl WpCredentials {
    /// A publish target, only when site URL, username and a password of
    /// either kind are all present. The application password wins over the
    /// account password.
    pub fn target(&self) -> Option<WpTarget> {
        let site_url = non_blank(&self.url)?;
        let username = non_blank(&self.username)?;
        let password = non_blank(&self.application_password).or_else(|| non_blank(&self.password))?;

        Some(WpTarget {
            site_url,
            username,
            password,
            post_id: self.post_id.as_ref().and_then(PostIdInput::as_id),
            mapping_key: non_blank(&self.mapping_key),
        })
    }
}
