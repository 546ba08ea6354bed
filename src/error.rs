//! Error types for the scoring core

use thiserror::Error;

/// Errors surfaced by scorers, record parsing and model training.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A record was missing a field, carried the wrong type, or held an out-of-range value
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Classifier fitting could not proceed
    #[error("training failed: {0}")]
    Training(String),
}

impl ScoringError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a decode error, naming the field it occurred at.
    ///
    /// Missing fields are reported by the enclosing record, so those fall
    /// back to the record name with the field named in the reason.
    pub fn from_decode(record: &str, err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let field = if path == "." { record.to_string() } else { path };
        ScoringError::InvalidInput {
            field,
            reason: err.into_inner().to_string(),
        }
    }

    /// Short machine-readable tag used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::InvalidInput { .. } => "invalid_input",
            ScoringError::Training(_) => "training",
        }
    }
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;
