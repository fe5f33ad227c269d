use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use crate::domains::images::{publish_batch, BatchSummary, GenerateRequest};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// `POST /generate`
///
/// The batch runs on its own task so a dropped connection does not cancel it
/// between rows; whatever it completes stays readable under `/batches/:id`.
pub async fn generate_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<BatchSummary>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let deps = state.server_deps.clone();
    let summary = tokio::spawn(async move { publish_batch(request, &deps).await })
        .await
        .context("Batch task did not complete")??;

    Ok(Json(summary))
}
