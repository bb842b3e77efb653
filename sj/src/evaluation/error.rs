//! Response validation error types

use thiserror::Error;

/// Broad category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text is not JSON, or a field has the wrong type
    Parse,
    /// A required key is absent or an unexpected criteria key is present
    Schema,
    /// A score lies outside [0, 1]
    Range,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Schema => write!(f, "schema"),
            ErrorKind::Range => write!(f, "range"),
        }
    }
}

/// Errors raised while validating a judge response
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("schema error: missing required key `{0}`")]
    MissingKey(String),

    #[error("schema error: unexpected key `{0}`")]
    UnexpectedKey(String),

    #[error("range error: `{field}` = {value} is outside [0, 1]")]
    OutOfRange { field: String, value: f64 },
}

impl ResponseError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResponseError::Parse(_) => ErrorKind::Parse,
            ResponseError::MissingKey(_) | ResponseError::UnexpectedKey(_) => ErrorKind::Schema,
            ResponseError::OutOfRange { .. } => ErrorKind::Range,
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(e: serde_json::Error) -> Self {
        ResponseError::Parse(e.to_string())
    }
}
