use thiserror::Error;

pub type Result<T> = std::result::Result<T, DropboxError>;

#[derive(Debug, Error)]
pub enum DropboxError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dropbox API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A share link for the path exists already. Carries the existing link
    /// when Dropbox included it in the error body.
    #[error("Shared link already exists for path")]
    SharedLinkAlreadyExists(Option<crate::types::SharedLinkMetadata>),

    #[error("No shared link found for {0}")]
    NoSharedLink(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
