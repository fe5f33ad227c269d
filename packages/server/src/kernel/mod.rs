//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod generation;
pub mod placeholder;
pub mod publishing;
pub mod storage;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use generation::{photographic_prompt, OpenAIImageGenerator, StubImageGenerator};
pub use placeholder::render_placeholder;
pub use publishing::WordPressPublisher;
pub use storage::{sanitize_file_stem, storage_file_name, DropboxStorage, StubStorage};
pub use store::PgImageStore;
pub use test_dependencies::{
    InMemoryImageStore, MockImageGenerator, MockPublisher, MockStorage, TestDependencies,
};
pub use traits::*;
