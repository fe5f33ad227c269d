//! The batch workflow: one batch record, then each valid row in order through
//! generate, upload, publish and persist.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::validate::{effective_prompt, validate_rows};
use crate::domains::images::data::{
    BatchSummary, GenerateRequest, GenerationKind, PublishOutcome, RowOutcome, RowResult,
    RowStage, SpreadsheetRow,
};
use crate::domains::images::models::{Image, ImageBatch};
use crate::kernel::{
    BaseImageGenerator, BasePublisher, BaseStorageBackend, Generation, ServerDeps, UploadFile,
    WpTarget,
};

/// Request-level failures. Row-level failures never surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("No valid rows to process ({skipped} skipped); each row needs actual_prompt_for_image_generating_ai_tool and file_name")]
    NoValidRows { skipped: usize },

    #[error("Failed to create image batch: {0:#}")]
    CreateBatch(anyhow::Error),
}

/// Why a single row was abandoned.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Image generation failed: {0:#}")]
    Generation(anyhow::Error),

    #[error("Storage upload failed: {0:#}")]
    Upload(anyhow::Error),

    #[error("Saving image record failed: {0:#}")]
    Persist(anyhow::Error),
}

impl RowError {
    pub fn stage(&self) -> RowStage {
        match self {
            RowError::Generation(_) => RowStage::Generation,
            RowError::Upload(_) => RowStage::Upload,
            RowError::Persist(_) => RowStage::Persist,
        }
    }
}

struct CompletedRow {
    image: Image,
    generation: Generation,
    publish: PublishOutcome,
}

/// Run a whole publish request. Returns `NoValidRows` before touching the
/// store when nothing survives validation.
pub async fn publish_batch(
    request: GenerateRequest,
    deps: &ServerDeps,
) -> Result<BatchSummary, BatchError> {
    let validated = validate_rows(&request.spreadsheet_data);
    if validated.is_empty() {
        return Err(BatchError::NoValidRows {
            skipped: validated.skipped,
        });
    }

    let total = validated.rows.len();
    let batch = deps
        .store
        .create_batch(&ImageBatch::note_for(total))
        .await
        .map_err(BatchError::CreateBatch)?;

    let target = request
        .wp_credentials
        .as_ref()
        .and_then(|credentials| credentials.target());

    info!(
        batch_id = %batch.id,
        total,
        skipped = validated.skipped,
        ai_model = %request.ai_model,
        storage_service = %request.storage_service,
        publish = target.is_some(),
        "Starting image batch"
    );

    let generator = deps.generator(request.ai_model);
    let storage = deps.storage(request.storage_service);

    let mut images = Vec::with_capacity(total);
    let mut rows = Vec::with_capacity(total);

    for row in validated.rows {
        let result = match process_row(
            &row,
            &batch,
            generator.as_ref(),
            storage.as_ref(),
            target.as_ref(),
            deps,
        )
        .await
        {
            Ok(completed) => {
                images.push(completed.image.clone());
                RowResult::Completed {
                    image: completed.image,
                    generation: if completed.generation.is_fallback() {
                        GenerationKind::Fallback
                    } else {
                        GenerationKind::Generated
                    },
                    fallback_reason: completed.generation.fallback_reason().map(str::to_string),
                    publish: completed.publish,
                }
            }
            Err(e) => {
                warn!(
                    batch_id = %batch.id,
                    index = row.index,
                    file_name = %row.file_name,
                    error = %e,
                    "Row failed"
                );
                RowResult::Failed {
                    stage: e.stage(),
                    error: e.to_string(),
                }
            }
        };

        rows.push(RowOutcome {
            index: row.index,
            file_name: row.file_name,
            result,
        });
    }

    let count = images.len();
    info!(batch_id = %batch.id, total, count, "Image batch finished");

    Ok(BatchSummary {
        message: format!("Processed {} of {} images", count, total),
        batch_id: batch.id,
        total,
        count,
        skipped: validated.skipped,
        images,
        rows,
    })
}

async fn process_row(
    row: &SpreadsheetRow,
    batch: &ImageBatch,
    generator: &dyn BaseImageGenerator,
    storage: &dyn BaseStorageBackend,
    target: Option<&WpTarget>,
    deps: &ServerDeps,
) -> Result<CompletedRow, RowError> {
    let prompt = effective_prompt(&row.prompt);

    let generation = generator
        .generate(&prompt)
        .await
        .map_err(RowError::Generation)?;
    if let Some(reason) = generation.fallback_reason() {
        debug!(index = row.index, reason, "Using placeholder image");
    }

    let payload = generation.payload();
    let file = UploadFile {
        bytes: &payload.bytes,
        file_name: &row.file_name,
        mime_type: &payload.mime_type,
    };

    let img_url = storage.upload(&file).await.map_err(RowError::Upload)?;

    let publish = match target {
        Some(target) => publish_row(deps.publisher.as_ref(), target, &file, row).await,
        None => PublishOutcome::Skipped,
    };

    let image = deps
        .store
        .create_image(batch.id, &img_url)
        .await
        .map_err(RowError::Persist)?;

    Ok(CompletedRow {
        image,
        generation,
        publish,
    })
}

async fn publish_row(
    publisher: &dyn BasePublisher,
    target: &WpTarget,
    file: &UploadFile<'_>,
    row: &SpreadsheetRow,
) -> PublishOutcome {
    match publisher.publish(target, file).await {
        Ok(receipt) => PublishOutcome::Published {
            media_id: receipt.media_id,
            post_id: receipt.post_id,
        },
        Err(e) => {
            warn!(
                index = row.index,
                file_name = %row.file_name,
                error = %format!("{:#}", e),
                "WordPress publish failed"
            );
            PublishOutcome::Failed {
                error: format!("{:#}", e),
            }
        }
    }
}
