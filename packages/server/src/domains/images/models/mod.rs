pub mod image;
pub mod image_batch;

pub use image::{CreateImage, Image};
pub use image_batch::ImageBatch;
