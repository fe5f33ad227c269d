//! Server dependencies for the batch workflow (using traits for testability)
//!
//! Every external service sits behind a Base* trait so tests can swap in the
//! mocks from `test_dependencies`.

use std::sync::Arc;

use dropbox_client::DropboxClient;
use openai_client::OpenAIClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::domains::images::data::{AiModel, StorageService};
use crate::kernel::{
    BaseImageGenerator, BaseImageStore, BasePublisher, BaseStorageBackend, DropboxStorage,
    OpenAIImageGenerator, PgImageStore, StubImageGenerator, StubStorage, WordPressPublisher,
};

// =============================================================================
// ServerDeps
// =============================================================================

/// One generator per AI model, one backend per storage service, plus the
/// publisher and the store.
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseImageStore>,
    pub openai: Arc<dyn BaseImageGenerator>,
    pub midjourney: Arc<dyn BaseImageGenerator>,
    pub gemini: Arc<dyn BaseImageGenerator>,
    pub google_drive: Arc<dyn BaseStorageBackend>,
    pub dropbox: Arc<dyn BaseStorageBackend>,
    pub amazon_s3: Arc<dyn BaseStorageBackend>,
    pub publisher: Arc<dyn BasePublisher>,
}

impl ServerDeps {
    /// Production wiring. Missing API credentials are not an error here: the
    /// OpenAI generator falls back to placeholders and Dropbox rows fail
    /// individually.
    pub fn from_config(config: &Config, pool: PgPool) -> Self {
        let openai_client = config.openai_api_key.clone().map(OpenAIClient::new);
        let dropbox_client = config.dropbox_access_token.clone().map(DropboxClient::new);

        if openai_client.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; OpenAI rows will use placeholder images");
        }
        if dropbox_client.is_none() {
            tracing::warn!("DROPBOX_ACCESS_TOKEN not set; Dropbox uploads will fail");
        }

        Self {
            store: Arc::new(PgImageStore::new(pool)),
            openai: Arc::new(OpenAIImageGenerator::new(
                openai_client,
                &config.openai_image_model,
                &config.openai_image_size,
            )),
            midjourney: Arc::new(StubImageGenerator::midjourney(config.stub_latency)),
            gemini: Arc::new(StubImageGenerator::gemini(config.stub_latency)),
            google_drive: Arc::new(StubStorage::google_drive(config.stub_latency)),
            dropbox: Arc::new(DropboxStorage::new(dropbox_client, &config.dropbox_folder)),
            amazon_s3: Arc::new(StubStorage::amazon_s3(
                &config.s3_bucket,
                &config.s3_region,
                config.stub_latency,
            )),
            publisher: Arc::new(WordPressPublisher::new(config.wp_accept_invalid_certs)),
        }
    }

    pub fn generator(&self, model: AiModel) -> Arc<dyn BaseImageGenerator> {
        match model {
            AiModel::OpenAi => self.openai.clone(),
            AiModel::Midjourney => self.midjourney.clone(),
            AiModel::Gemini => self.gemini.clone(),
        }
    }

    pub fn storage(&self, service: StorageService) -> Arc<dyn BaseStorageBackend> {
        match service {
            StorageService::GoogleDrive => self.google_drive.clone(),
            StorageService::Dropbox => self.dropbox.clone(),
            StorageService::AmazonS3 => self.amazon_s3.clone(),
        }
    }
}
