use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChaseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Malformed HTTP request: {0}")]
    HttpError(String),

    #[error("Request body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, ChaseError>;
