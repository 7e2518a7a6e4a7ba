use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShrError {
    #[error("Unknown size category: {0}")]
    UnknownCategory(String),
    #[error("Invalid key pattern {pattern:?}: {reason}")]
    InvalidKeyPattern { pattern: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShrError>;
