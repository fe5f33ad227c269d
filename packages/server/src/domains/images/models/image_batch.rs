use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::ImageBatchId;

/// Grouping record for one publish request. Never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ImageBatch {
    pub id: ImageBatchId,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl ImageBatch {
    /// Note stored on a new batch, tagged with the number of valid rows.
    pub fn note_for(valid_rows: usize) -> String {
        format!("Batch of {} images", valid_rows)
    }

    pub async fn create(note: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO image_batches (id, note)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(ImageBatchId::new())
        .bind(note)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ImageBatchId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM image_batches WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Newest first.
    pub async fn find_recent(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM image_batches ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
