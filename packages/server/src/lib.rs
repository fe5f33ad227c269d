// Snefuru Batch Image Publisher - API Core
//
// Turns spreadsheet rows of prompts into images: generate with an AI model,
// upload to cloud storage, optionally attach to a WordPress post.
//
// Domain logic lives in domains/, external services behind kernel/ traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
