//! WordPress publishing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use wordpress_client::{Credentials, PostUpdate, WordPressClient};

use super::storage::storage_file_name;
use super::{BasePublisher, PublishReceipt, UploadFile, WpTarget};

/// Publishes images to the site named in each request. A client is built per
/// call because every request can target a different site.
pub struct WordPressPublisher {
    accept_invalid_certs: bool,
}

impl WordPressPublisher {
    pub fn new(accept_invalid_certs: bool) -> Self {
        Self {
            accept_invalid_certs,
        }
    }
}

#[async_trait]
impl BasePublisher for WordPressPublisher {
    async fn publish(&self, target: &WpTarget, file: &UploadFile<'_>) -> Result<PublishReceipt> {
        let client = WordPressClient::new(
            &target.site_url,
            Credentials {
                username: target.username.clone(),
                password: target.password.clone(),
            },
            self.accept_invalid_certs,
        )?;

        let user = client
            .current_user()
            .await
            .context("WordPress authentication failed")?;
        debug!(user_id = user.id, site = %client.api_root(), "Authenticated with WordPress");

        let file_name = storage_file_name(file.file_name, file.mime_type);
        let media = client
            .upload_media(file.bytes.to_vec(), &file_name, file.mime_type)
            .await
            .context("WordPress media upload failed")?;

        let Some(post_id) = target.post_id else {
            info!(media_id = media.id, "Uploaded media to WordPress (no post to attach)");
            return Ok(PublishReceipt {
                media_id: media.id,
                post_id: None,
            });
        };

        let update = match &target.mapping_key {
            Some(key) => PostUpdate::meta_field(key.clone(), media.id),
            None => PostUpdate::featured_media(media.id),
        };
        client
            .update_post(post_id, &update)
            .await
            .with_context(|| format!("Updating WordPress post {} failed", post_id))?;

        info!(media_id = media.id, post_id, "Published image to WordPress");
        Ok(PublishReceipt {
            media_id: media.id,
            post_id: Some(post_id),
        })
    }
}
