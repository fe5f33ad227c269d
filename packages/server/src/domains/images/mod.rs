pub mod activities;
pub mod data;
pub mod models;

pub use activities::{publish_batch, BatchError};
pub use data::{BatchSummary, GenerateRequest};
pub use models::{Image, ImageBatch};
