use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Connection failed: {0}")]
    ConnectionError(String),

    #[error("Navigation failed: {0}")]
    NavigationError(String),

    #[error("Capture failed: {0}")]
    CaptureError(String),

    #[error("Title assertion failed: expected {expected:?} in {title:?}")]
    AssertionFailure { expected: String, title: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
