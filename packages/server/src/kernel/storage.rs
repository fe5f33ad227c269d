//! Storage backends: Dropbox (real) and stand-ins for Google Drive and S3.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use dropbox_client::{direct_url, DropboxClient, WriteMode};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::{extension_for_mime, BaseStorageBackend, UploadFile};

/// Make a spreadsheet file name safe for a storage path. Every character
/// outside ASCII letters and digits becomes `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if stem.chars().all(|c| c == '_') {
        "image".to_string()
    } else {
        stem
    }
}

/// Storage file name: sanitized stem plus the extension for the MIME type.
/// An extension already present on the name is not repeated.
pub fn storage_file_name(file_name: &str, mime_type: &str) -> String {
    let extension = extension_for_mime(mime_type);
    let trimmed = file_name.trim();
    let base = trimmed
        .rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(extension))
        .map(|(stem, _)| stem)
        .unwrap_or(trimmed);

    format!("{}.{}", sanitize_file_stem(base), extension)
}

/// `/snefuru/`, `snefuru` and `/snefuru` all become `/snefuru`; empty stays empty.
pub fn normalize_folder(folder: &str) -> String {
    let trimmed = folder.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

// =============================================================================
// Dropbox
// =============================================================================

pub struct DropboxStorage {
    client: Option<DropboxClient>,
    folder: String,
}

impl DropboxStorage {
    pub fn new(client: Option<DropboxClient>, folder: &str) -> Self {
        Self {
            client,
            folder: normalize_folder(folder),
        }
    }

    pub fn path_for(&self, file: &UploadFile<'_>) -> String {
        format!(
            "{}/{}",
            self.folder,
            storage_file_name(file.file_name, file.mime_type)
        )
    }
}

#[async_trait]
impl BaseStorageBackend for DropboxStorage {
    async fn upload(&self, file: &UploadFile<'_>) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow!("DROPBOX_ACCESS_TOKEN not configured"))?;

        let path = self.path_for(file);
        let metadata = client
            .upload(&path, file.bytes.to_vec(), WriteMode::Overwrite)
            .await
            .with_context(|| format!("Dropbox upload to {} failed", path))?;

        let stored_path = metadata.path_display.unwrap_or(path);
        let share_url = client
            .share_link(&stored_path)
            .await
            .with_context(|| format!("Dropbox shared link for {} failed", stored_path))?;

        info!(path = %stored_path, size = metadata.size, "Uploaded to Dropbox");
        Ok(direct_url(&share_url))
    }
}

// =============================================================================
// Stand-ins (Google Drive, Amazon S3)
// =============================================================================

#[derive(Debug, Clone)]
enum StubTarget {
    GoogleDrive,
    AmazonS3 { bucket: String, region: String },
}

/// Storage without a working integration. Nothing leaves the process; the
/// URL is derived from the file name and content so reruns agree.
pub struct StubStorage {
    target: StubTarget,
    latency: Duration,
}

impl StubStorage {
    pub fn google_drive(latency: Duration) -> Self {
        Self {
            target: StubTarget::GoogleDrive,
            latency,
        }
    }

    pub fn amazon_s3(bucket: impl Into<String>, region: impl Into<String>, latency: Duration) -> Self {
        Self {
            target: StubTarget::AmazonS3 {
                bucket: bucket.into(),
                region: region.into(),
            },
            latency,
        }
    }

    fn url_for(&self, file: &UploadFile<'_>) -> String {
        let name = storage_file_name(file.file_name, file.mime_type);
        match &self.target {
            StubTarget::GoogleDrive => {
                let mut hasher = Sha256::new();
                hasher.update(name.as_bytes());
                hasher.update(file.bytes);
                let id = hex::encode(hasher.finalize());
                format!("https://drive.google.com/uc?export=view&id={}", &id[..33])
            }
            StubTarget::AmazonS3 { bucket, region } => {
                format!("https://{}.s3.{}.amazonaws.com/snefuru/{}", bucket, region, name)
            }
        }
    }
}

#[async_trait]
impl BaseStorageBackend for StubStorage {
    async fn upload(&self, file: &UploadFile<'_>) -> Result<String> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let url = self.url_for(file);
        debug!(url = %url, bytes = file.bytes.len(), "Stub storage accepted file");
        Ok(url)
    }
}
