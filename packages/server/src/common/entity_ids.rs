//! Typed ID definitions for domain entities.

pub use super::id::Id;

/// Marker type for ImageBatch entities (one per publish request).
pub struct ImageBatch;

/// Marker type for Image entities (one per completed row).
pub struct Image;

pub type ImageBatchId = Id<ImageBatch>;

pub type ImageId = Id<Image>;
