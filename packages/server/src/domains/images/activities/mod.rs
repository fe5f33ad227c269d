pub mod publish_batch;
pub mod validate;

pub use publish_batch::{publish_batch, BatchError, RowError};
pub use validate::{effective_prompt, validate_rows, ValidatedRows, DEFAULT_PROMPT};
