//! JSON shapes returned by the image routes.

use serde::Serialize;

use crate::common::ImageBatchId;
use crate::domains::images::models::{Image, ImageBatch};

/// Aggregate result of a publish request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub message: String,
    pub batch_id: ImageBatchId,
    /// Valid rows attempted
    pub total: usize,
    /// Rows that produced a persisted image; always `images.len()`
    pub count: usize,
    /// Rows dropped by validation
    pub skipped: usize,
    pub images: Vec<Image>,
    pub rows: Vec<RowOutcome>,
}

/// What happened to one valid row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
    pub index: usize,
    pub file_name: String,
    #[serde(flatten)]
    pub result: RowResult,
}

impl RowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.result, RowResult::Completed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowResult {
    #[serde(rename_all = "camelCase")]
    Completed {
        image: Image,
        generation: GenerationKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_reason: Option<String>,
        publish: PublishOutcome,
    },
    Failed { stage: RowStage, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    Generated,
    Fallback,
}

/// Step at which a row was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStage {
    Generation,
    Upload,
    Persist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// No complete WordPress target was supplied
    Skipped,
    #[serde(rename_all = "camelCase")]
    Published {
        media_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        post_id: Option<i64>,
    },
    Failed { error: String },
}

/// `GET /batches/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct BatchDetail {
    pub batch: ImageBatch,
    pub count: usize,
    pub images: Vec<Image>,
}

/// `GET /batches`
#[derive(Debug, Clone, Serialize)]
pub struct BatchList {
    pub batches: Vec<ImageBatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    use crate::common::ImageId;

    fn image() -> Image {
        Image {
            id: ImageId::new(),
            created_at: Utc::now(),
            img_url: "https://storage.test/barn1.png".into(),
            batch_id: ImageBatchId::new(),
        }
    }

    #[test]
    fn completed_row_serializes_flat_with_status() {
        let outcome = RowOutcome {
            index: 0,
            file_name: "barn1".into(),
            result: RowResult::Completed {
                image: image(),
                generation: GenerationKind::Fallback,
                fallback_reason: Some("quota exceeded".into()),
                publish: PublishOutcome::Skipped,
            },
        };
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["index"], 0);
        assert_eq!(value["fileName"], "barn1");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["generation"], "fallback");
        assert_eq!(value["fallbackReason"], "quota exceeded");
        assert_eq!(value["publish"], json!({ "status": "skipped" }));
        assert_eq!(value["image"]["img_url"], "https://storage.test/barn1.png");
    }

    #[test]
    fn failed_row_names_the_stage() {
        let outcome = RowOutcome {
            index: 3,
            file_name: "barn4".into(),
            result: RowResult::Failed {
                stage: RowStage::Upload,
                error: "connection reset".into(),
            },
        };
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["status"], "failed");
        assert_eq!(value["stage"], "upload");
        assert_eq!(value["error"], "connection reset");
        assert!(!outcome.is_completed());
    }

    #[test]
    fn published_outcome_uses_camel_case_ids() {
        let value = serde_json::to_value(PublishOutcome::Published {
            media_id: 99,
            post_id: Some(42),
        })
        .unwrap();

        assert_eq!(value, json!({ "status": "published", "mediaId": 99, "postId": 42 }));
    }
}
