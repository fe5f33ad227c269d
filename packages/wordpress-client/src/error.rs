use thiserror::Error;

pub type Result<T> = std::result::Result<T, WordPressError>;

#[derive(Debug, Error)]
pub enum WordPressError {
    #[error("Invalid site URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("WordPress API error ({status}): {message}")]
    Api { status: u16, message: String },
}
