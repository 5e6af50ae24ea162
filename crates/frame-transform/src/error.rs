use frame_model::FrameError;
use thiserror::Error;

/// Invalid field matcher pattern.
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("unsupported flag {flag:?} in pattern {pattern:?}")]
    UnsupportedFlag { pattern: String, flag: char },
}

/// Transformer registration and lookup errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("transformer {0:?} is already registered")]
    DuplicateId(String),
    #[error("transformer {0:?} is not registered")]
    NotFound(String),
}

/// Failure of a single transformer stage.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid options for {id}: {source}")]
    InvalidOptions {
        id: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, TransformError>;
