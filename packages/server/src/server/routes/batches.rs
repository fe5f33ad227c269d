use anyhow::Context;
use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use crate::common::ImageBatchId;
use crate::domains::images::data::{BatchDetail, BatchList};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListBatchesQuery {
    pub limit: Option<i64>,
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// `GET /batches` - newest first
pub async fn list_batches_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<ListBatchesQuery>,
) -> Result<Json<BatchList>, ApiError> {
    let batches = state
        .server_deps
        .store
        .find_recent_batches(clamp_limit(query.limit))
        .await
        .context("Failed to load batches")?;

    Ok(Json(BatchList { batches }))
}

/// `GET /batches/:id`
pub async fn get_batch_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> Result<Json<BatchDetail>, ApiError> {
    let id = ImageBatchId::parse(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid batch id: {}", id)))?;

    let store = &state.server_deps.store;
    let batch = store
        .find_batch(id)
        .await
        .context("Failed to load batch")?
        .ok_or_else(|| ApiError::NotFound(format!("Batch {} not found", id)))?;

    let images = store
        .find_images(id)
        .await
        .context("Failed to load batch images")?;

    Ok(Json(BatchDetail {
        batch,
        count: images.len(),
        images,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-3)), 1);
        assert_eq!(clamp_limit(Some(1000)), 100);
    }
}
