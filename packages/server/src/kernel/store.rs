use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::BaseImageStore;
use crate::common::ImageBatchId;
use crate::domains::images::models::{CreateImage, Image, ImageBatch};

/// Postgres-backed store. Thin delegation to the model methods.
#[derive(Clone)]
pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseImageStore for PgImageStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_batch(&self, note: &str) -> Result<ImageBatch> {
        ImageBatch::create(note, &self.pool).await
    }

    async fn create_image(&self, batch_id: ImageBatchId, img_url: &str) -> Result<Image> {
        Image::create(
            CreateImage::builder()
                .batch_id(batch_id)
                .img_url(img_url)
                .build(),
            &self.pool,
        )
        .await
    }

    async fn find_batch(&self, id: ImageBatchId) -> Result<Option<ImageBatch>> {
        ImageBatch::find_by_id(id, &self.pool).await
    }

    async fn find_recent_batches(&self, limit: i64) -> Result<Vec<ImageBatch>> {
        ImageBatch::find_recent(limit, &self.pool).await
    }

    async fn find_images(&self, batch_id: ImageBatchId) -> Result<Vec<Image>> {
        Image::find_by_batch(batch_id, &self.pool).await
    }
}
