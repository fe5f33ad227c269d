use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::{ImageBatchId, ImageId};

/// A generated image that reached storage. One per completed row; the
/// `img_url` is whatever the storage backend resolved.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Image {
    pub id: ImageId,
    pub created_at: DateTime<Utc>,
    pub img_url: String,
    pub batch_id: ImageBatchId,
}

#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateImage<'a> {
    pub batch_id: ImageBatchId,
    pub img_url: &'a str,
}

impl Image {
    pub async fn create(input: CreateImage<'_>, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO images (id, img_url, batch_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(ImageId::new())
        .bind(input.img_url)
        .bind(input.batch_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Images of a batch in insertion order.
    pub async fn find_by_batch(batch_id: ImageBatchId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM images WHERE batch_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(batch_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
