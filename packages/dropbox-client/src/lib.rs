//! Pure Dropbox REST API client.
//!
//! Covers the three calls needed to publish a file: upload, create a public
//! share link, and look up an existing share link.
//!
//! # Example
//!
//! ```rust,ignore
//! use dropbox_client::{DropboxClient, WriteMode};
//!
//! let client = DropboxClient::new("sl.access-token".into());
//!
//! client.upload("/snefuru/barn1.png", bytes, WriteMode::Overwrite).await?;
//! let url = client.share_link("/snefuru/barn1.png").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{DropboxError, Result};
pub use types::{FileMetadata, SharedLinkMetadata, WriteMode};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::{
    ApiErrorBody, CreateSharedLinkArg, ListSharedLinksArg, ListSharedLinksResult,
    SharedLinkSettings, UploadArg,
};

const API_URL: &str = "https://api.dropboxapi.com/2";
const CONTENT_URL: &str = "https://content.dropboxapi.com/2";

#[derive(Clone)]
pub struct DropboxClient {
    client: reqwest::Client,
    access_token: String,
    api_url: String,
    content_url: String,
}

impl DropboxClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            api_url: API_URL.to_string(),
            content_url: CONTENT_URL.to_string(),
        }
    }

    /// Point both the RPC and content endpoints somewhere else (tests, proxies).
    pub fn with_base_urls(mut self, api_url: impl Into<String>, content_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.content_url = content_url.into();
        self
    }

    /// Upload bytes to `path`. Files above 150 MB need upload sessions, which
    /// this client does not implement.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, mode: WriteMode) -> Result<FileMetadata> {
        let arg = UploadArg {
            path: path.to_string(),
            mode,
            autorename: false,
            mute: true,
        };

        let url = format!("{}/files/upload", self.content_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Dropbox-API-Arg", header_safe_json(&arg)?)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        let metadata: FileMetadata = Self::parse(resp).await?;
        tracing::debug!(path, size = metadata.size, "Uploaded file to Dropbox");
        Ok(metadata)
    }

    /// Create a public share link. Fails with
    /// [`DropboxError::SharedLinkAlreadyExists`] when one exists already.
    pub async fn create_shared_link(&self, path: &str) -> Result<SharedLinkMetadata> {
        let arg = CreateSharedLinkArg {
            path: path.to_string(),
            settings: SharedLinkSettings::default(),
        };
        self.rpc("sharing/create_shared_link_with_settings", &arg)
            .await
    }

    /// List share links pointing directly at `path`.
    pub async fn list_shared_links(&self, path: &str) -> Result<Vec<SharedLinkMetadata>> {
        let arg = ListSharedLinksArg {
            path: path.to_string(),
            direct_only: true,
        };
        let result: ListSharedLinksResult = self.rpc("sharing/list_shared_links", &arg).await?;
        Ok(result.links)
    }

    /// Return a public share URL for `path`, reusing the existing link if the
    /// file has been shared before.
    pub async fn share_link(&self, path: &str) -> Result<String> {
        match self.create_shared_link(path).await {
            Ok(link) => Ok(link.url),
            Err(DropboxError::SharedLinkAlreadyExists(Some(existing))) => {
                tracing::debug!(path, "Reusing shared link from conflict response");
                Ok(existing.url)
            }
            Err(DropboxError::SharedLinkAlreadyExists(None)) => {
                tracing::debug!(path, "Shared link exists, listing links");
                self.list_shared_links(path)
                    .await?
                    .into_iter()
                    .next()
                    .map(|link| link.url)
                    .ok_or_else(|| DropboxError::NoSharedLink(path.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn rpc<A: Serialize, T: DeserializeOwned>(&self, endpoint: &str, arg: &A) -> Result<T> {
        let url = format!("{}/{}", self.api_url, endpoint);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(arg)
            .send()
            .await?;

        Self::parse(resp).await
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::CONFLICT {
            if let Ok(error) = serde_json::from_str::<ApiErrorBody>(&body) {
                if error.is_shared_link_already_exists() {
                    return Err(DropboxError::SharedLinkAlreadyExists(error.existing_link()));
                }
                return Err(DropboxError::Api {
                    status: status.as_u16(),
                    message: error.error_summary,
                });
            }
        }

        Err(DropboxError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// Rewrite a share URL so it serves the file itself instead of the preview page.
pub fn direct_url(share_url: &str) -> String {
    if share_url.contains("dl=0") {
        share_url.replace("dl=0", "raw=1")
    } else if share_url.contains("raw=1") {
        share_url.to_string()
    } else if share_url.contains('?') {
        format!("{}&raw=1", share_url)
    } else {
        format!("{}?raw=1", share_url)
    }
}

/// HTTP headers must be ASCII, so non-ASCII characters in the JSON argument
/// are escaped as `\uXXXX`.
fn header_safe_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_url_swaps_preview_flag() {
        assert_eq!(
            direct_url("https://www.dropbox.com/scl/fi/abc/barn1.png?rlkey=x&dl=0"),
            "https://www.dropbox.com/scl/fi/abc/barn1.png?rlkey=x&raw=1"
        );
        assert_eq!(
            direct_url("https://www.dropbox.com/s/abc/barn1.png"),
            "https://www.dropbox.com/s/abc/barn1.png?raw=1"
        );
        assert_eq!(
            direct_url("https://www.dropbox.com/s/abc/barn1.png?raw=1"),
            "https://www.dropbox.com/s/abc/barn1.png?raw=1"
        );
    }

    #[test]
    fn header_json_escapes_non_ascii() {
        let arg = UploadArg {
            path: "/snefuru/café.png".to_string(),
            mode: WriteMode::Overwrite,
            autorename: false,
            mute: true,
        };
        let header = header_safe_json(&arg).unwrap();

        assert!(header.is_ascii());
        assert!(header.contains("caf\\u00e9.png"));
        assert!(header.contains("\"mode\":\"overwrite\""));
    }

    #[test]
    fn conflict_body_exposes_existing_link() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{
                "error_summary": "shared_link_already_exists/metadata/..",
                "error": {
                    ".tag": "shared_link_already_exists",
                    "shared_link_already_exists": {
                        ".tag": "metadata",
                        "metadata": { ".tag": "file", "url": "https://db.tt/existing?dl=0", "name": "a.png" }
                    }
                }
            }"#,
        )
        .unwrap();

        assert!(body.is_shared_link_already_exists());
        assert_eq!(body.existing_link().unwrap().url, "https://db.tt/existing?dl=0");
    }
}
