use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_image_model: String,
    pub openai_image_size: String,
    pub dropbox_access_token: Option<String>,
    pub dropbox_folder: String,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Simulated latency for the stand-in generators and storage backends
    pub stub_latency: Duration,
    /// Skip TLS verification for WordPress sites (staging with self-signed certs)
    pub wp_accept_invalid_certs: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_image_model: env::var("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|_| "dall-e-3".to_string()),
            openai_image_size: env::var("OPENAI_IMAGE_SIZE")
                .unwrap_or_else(|_| "1024x1024".to_string()),
            dropbox_access_token: non_empty_var("DROPBOX_ACCESS_TOKEN"),
            dropbox_folder: env::var("DROPBOX_FOLDER").unwrap_or_else(|_| "/snefuru".to_string()),
            s3_bucket: env::var("S3_BUCKET").unwrap_or_else(|_| "snefuru-images".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            stub_latency: Duration::from_millis(
                env::var("STUB_LATENCY_MS")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .context("STUB_LATENCY_MS must be a number of milliseconds")?,
            ),
            wp_accept_invalid_certs: parse_bool(
                &env::var("WP_ACCEPT_INVALID_CERTS").unwrap_or_default(),
            ),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
