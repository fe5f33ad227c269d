// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Mocks share their state through Arcs, so keep a clone to inspect calls
// after handing one to TestDependencies.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::{
    storage::storage_file_name, BaseImageGenerator, BaseImageStore, BasePublisher,
    BaseStorageBackend, Generation, ImagePayload, PublishReceipt, ServerDeps, UploadFile,
    WpTarget,
};
use crate::common::{ImageBatchId, ImageId};
use crate::domains::images::models::{Image, ImageBatch};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

// =============================================================================
// Mock Image Generator
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratorMode {
    Generate,
    Fallback,
}

#[derive(Clone)]
pub struct MockImageGenerator {
    mode: GeneratorMode,
    fail_prompts: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerator {
    /// Returns a small PNG for every prompt.
    pub fn new() -> Self {
        Self {
            mode: GeneratorMode::Generate,
            fail_prompts: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always returns a fallback placeholder.
    pub fn falling_back() -> Self {
        Self {
            mode: GeneratorMode::Fallback,
            ..Self::new()
        }
    }

    /// Error only for this prompt.
    pub fn fail_on(self, prompt: &str) -> Self {
        self.fail_prompts.lock().unwrap().insert(prompt.to_string());
        self
    }

    /// Prompts received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if self.fail_prompts.lock().unwrap().contains(prompt) {
            return Err(anyhow!("mock generation failure"));
        }

        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(prompt.as_bytes());
        let payload = ImagePayload::new(bytes, "image/png");

        Ok(match self.mode {
            GeneratorMode::Fallback => Generation::Fallback {
                payload,
                reason: "mock fallback".to_string(),
            },
            GeneratorMode::Generate => Generation::Generated(payload),
        })
    }
}

// =============================================================================
// Mock Storage
// =============================================================================

/// Arguments captured from an upload call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub file_name: String,
    pub mime_type: String,
    pub size: usize,
}

#[derive(Clone)]
pub struct MockStorage {
    fail_names: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<UploadCall>>>,
}

impl MockStorage {
    /// Accepts everything and returns `https://storage.test/{name}`.
    pub fn new() -> Self {
        Self {
            fail_names: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reject uploads for this spreadsheet file name.
    pub fn fail_on(self, file_name: &str) -> Self {
        self.fail_names.lock().unwrap().insert(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn url_for(file_name: &str, mime_type: &str) -> String {
        format!(
            "https://storage.test/{}",
            storage_file_name(file_name, mime_type)
        )
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseStorageBackend for MockStorage {
    async fn upload(&self, file: &UploadFile<'_>) -> Result<String> {
        self.calls.lock().unwrap().push(UploadCall {
            file_name: file.file_name.to_string(),
            mime_type: file.mime_type.to_string(),
            size: file.bytes.len(),
        });

        if self.fail_names.lock().unwrap().contains(file.file_name) {
            return Err(anyhow!("mock upload failure for {}", file.file_name));
        }

        Ok(Self::url_for(file.file_name, file.mime_type))
    }
}

// =============================================================================
// Mock Publisher
// =============================================================================

/// Arguments captured from a publish call
#[derive(Debug, Clone)]
pub struct PublishCall {
    pub target: WpTarget,
    pub file_name: String,
}

#[derive(Clone)]
pub struct MockPublisher {
    failure: Option<String>,
    next_media_id: Arc<Mutex<i64>>,
    calls: Arc<Mutex<Vec<PublishCall>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            failure: None,
            next_media_id: Arc::new(Mutex::new(100)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every publish fails with this message.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self) -> bool {
        !self.calls.lock().unwrap().is_empty()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePublisher for MockPublisher {
    async fn publish(&self, target: &WpTarget, file: &UploadFile<'_>) -> Result<PublishReceipt> {
        self.calls.lock().unwrap().push(PublishCall {
            target: target.clone(),
            file_name: file.file_name.to_string(),
        });

        if let Some(message) = &self.failure {
            return Err(anyhow!("{}", message));
        }

        let mut next = self.next_media_id.lock().unwrap();
        let media_id = *next;
        *next += 1;

        Ok(PublishReceipt {
            media_id,
            post_id: target.post_id,
        })
    }
}

// =============================================================================
// In-memory Image Store
// =============================================================================

#[derive(Default)]
struct StoreState {
    batches: Vec<ImageBatch>,
    images: Vec<Image>,
}

#[derive(Clone, Default)]
pub struct InMemoryImageStore {
    state: Arc<Mutex<StoreState>>,
    fail_batches: bool,
    fail_images: bool,
    unreachable: bool,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch inserts fail.
    pub fn failing_batches(mut self) -> Self {
        self.fail_batches = true;
        self
    }

    /// Image inserts fail.
    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    /// `ping` fails, as with a dropped database.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn batches(&self) -> Vec<ImageBatch> {
        self.state.lock().unwrap().batches.clone()
    }

    pub fn images(&self) -> Vec<Image> {
        self.state.lock().unwrap().images.clone()
    }
}

#[async_trait]
impl BaseImageStore for InMemoryImageStore {
    async fn ping(&self) -> Result<()> {
        if self.unreachable {
            return Err(anyhow!("mock database unreachable"));
        }
        Ok(())
    }

    async fn create_batch(&self, note: &str) -> Result<ImageBatch> {
        if self.fail_batches {
            return Err(anyhow!("mock batch insert failure"));
        }

        let batch = ImageBatch {
            id: ImageBatchId::new(),
            created_at: Utc::now(),
            note: Some(note.to_string()),
        };
        self.state.lock().unwrap().batches.push(batch.clone());
        Ok(batch)
    }

    async fn create_image(&self, batch_id: ImageBatchId, img_url: &str) -> Result<Image> {
        if self.fail_images {
            return Err(anyhow!("mock image insert failure"));
        }

        let mut state = self.state.lock().unwrap();
        if !state.batches.iter().any(|b| b.id == batch_id) {
            return Err(anyhow!("batch {} does not exist", batch_id));
        }

        let image = Image {
            id: ImageId::new(),
            created_at: Utc::now(),
            img_url: img_url.to_string(),
            batch_id,
        };
        state.images.push(image.clone());
        Ok(image)
    }

    async fn find_batch(&self, id: ImageBatchId) -> Result<Option<ImageBatch>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .batches
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn find_recent_batches(&self, limit: i64) -> Result<Vec<ImageBatch>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .state
            .lock()
            .unwrap()
            .batches
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_images(&self, batch_id: ImageBatchId) -> Result<Vec<Image>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .images
            .iter()
            .filter(|i| i.batch_id == batch_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// TestDependencies builder
// =============================================================================

/// Defaults to working mocks for every service.
pub struct TestDependencies {
    pub store: InMemoryImageStore,
    pub generator: MockImageGenerator,
    pub storage: MockStorage,
    pub publisher: MockPublisher,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: InMemoryImageStore::new(),
            generator: MockImageGenerator::new(),
            storage: MockStorage::new(),
            publisher: MockPublisher::new(),
        }
    }

    pub fn mock_store(mut self, store: InMemoryImageStore) -> Self {
        self.store = store;
        self
    }

    pub fn mock_generator(mut self, generator: MockImageGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn mock_storage(mut self, storage: MockStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn mock_publisher(mut self, publisher: MockPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    /// The same generator serves every model and the same storage serves
    /// every service.
    pub fn into_server_deps(self) -> ServerDeps {
        let generator = Arc::new(self.generator);
        let storage = Arc::new(self.storage);

        ServerDeps {
            store: Arc::new(self.store),
            openai: generator.clone(),
            midjourney: generator.clone(),
            gemini: generator,
            google_drive: storage.clone(),
            dropbox: storage.clone(),
            amazon_s3: storage,
            publisher: Arc::new(self.publisher),
        }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
