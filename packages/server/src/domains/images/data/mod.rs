pub mod request;
pub mod response;

pub use request::{
    AiModel, GenerateRequest, PostIdInput, RawRow, SpreadsheetRow, StorageService, WpCredentials,
};
pub use response::{
    BatchDetail, BatchList, BatchSummary, GenerationKind, PublishOutcome, RowOutcome, RowResult,
    RowStage,
};
