//! Pure WordPress REST API client.
//!
//! Minimal coverage of the `wp/v2` API: credential check, media upload and
//! post update. Authentication is HTTP basic auth, which WordPress core
//! supports for application passwords.
//!
//! # Example
//!
//! ```rust,ignore
//! use wordpress_client::{Credentials, PostUpdate, WordPressClient};
//!
//! let client = WordPressClient::new(
//!     "https://staging.example.com",
//!     Credentials { username: "editor".into(), password: "abcd efgh ijkl".into() },
//!     false,
//! )?;
//!
//! client.current_user().await?;
//! let media = client.upload_media(bytes, "barn1.png", "image/png").await?;
//! client.update_post(42, &PostUpdate::featured_media(media.id)).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{Result, WordPressError};
pub use types::{Credentials, Media, Post, PostUpdate, User};

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use types::ApiErrorBody;

pub struct WordPressClient {
    client: reqwest::Client,
    api_root: String,
    credentials: Credentials,
}

impl WordPressClient {
    /// Build a client for `site_url`. Set `accept_invalid_certs` only for
    /// staging sites with self-signed certificates.
    pub fn new(site_url: &str, credentials: Credentials, accept_invalid_certs: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            api_root: format!("{}/wp-json/wp/v2", normalize_site_url(site_url)?),
            credentials,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Verify the credentials by fetching the authenticated user.
    pub async fn current_user(&self) -> Result<User> {
        let resp = self
            .client
            .get(format!("{}/users/me", self.api_root))
            .query(&[("context", "edit")])
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Upload raw bytes as a media library item.
    pub async fn upload_media(&self, bytes: Vec<u8>, file_name: &str, mime_type: &str) -> Result<Media> {
        let resp = self
            .client
            .post(format!("{}/media", self.api_root))
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(header::CONTENT_TYPE, mime_type)
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
            )
            .body(bytes)
            .send()
            .await?;

        let media: Media = Self::parse(resp).await?;
        tracing::debug!(media_id = media.id, file_name, "Uploaded WordPress media");
        Ok(media)
    }

    /// Apply a partial update to a post.
    pub async fn update_post(&self, post_id: i64, update: &PostUpdate) -> Result<Post> {
        let resp = self
            .client
            .post(format!("{}/posts/{}", self.api_root, post_id))
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(update)
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
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| format!("{}: {}", e.code, e.message))
            .unwrap_or(body);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WordPressError::Unauthorized {
                status: status.as_u16(),
                message,
            });
        }

        Err(WordPressError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Accepts `example.com`, `https://example.com/` or a subdirectory install
/// (`https://example.com/blog`). Returns the URL without a trailing slash.
pub fn normalize_site_url(site_url: &str) -> Result<String> {
    let trimmed = site_url.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = url::Url::parse(&with_scheme)
        .map_err(|e| WordPressError::InvalidUrl(format!("{}: {}", site_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(WordPressError::InvalidUrl(site_url.to_string()));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
