use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("field `{field}` has {actual} values, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("rows must be JSON objects, row {row} is {kind}")]
    RowNotObject { row: usize, kind: &'static str },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
