//! Token calculator error types.
//!
//! Two kinds of failure come out of the counting core:
//!
//! - [`TokCalcError::UnresolvedModel`]: the model name has no known encoding.
//!   Callers are expected to recover by asking for a different model.
//! - [`TokCalcError::EncodingFailure`]: the encoder refused the input (for
//!   example a special-token literal under the `reject` policy). Encoding is
//!   deterministic, so the same input fails the same way on retry.
//!
//! The remaining variants belong to the surfaces around the core (documents,
//! configuration, remote model listing).

use std::path::PathBuf;

use thiserror::Error;

/// Token calculator errors.
#[derive(Error, Debug)]
pub enum TokCalcError {
    /// No encoding is known for the model identifier.
    #[error("No encoding known for model '{model}'")]
    UnresolvedModel {
        /// Model identifier as supplied by the caller.
        model: String,
    },

    /// The encoder could not process the input.
    #[error("Encoding failure: {0}")]
    EncodingFailure(String),

    /// Unknown encoding scheme name.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Document format this crate does not extract text from.
    #[error("Unsupported document format '{extension}': {}", path.display())]
    UnsupportedDocument {
        /// Path of the rejected document.
        path: PathBuf,
        /// Lowercased file extension.
        extension: String,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Network communication error.
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream service answered with an error status.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TokCalcError {
    /// Whether the caller can recover by choosing a different model.
    pub fn is_unresolved_model(&self) -> bool {
        matches!(self, TokCalcError::UnresolvedModel { .. })
    }
}

/// Result type alias for token calculator operations
pub type Result<T> = std::result::Result<T, TokCalcError>;

impl From<reqwest::Error> for TokCalcError {
    fn from(err: reqwest::Error) -> Self {
        TokCalcError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for TokCalcError {
    fn from(err: toml::de::Error) -> Self {
        TokCalcError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_model_message() {
        let err = TokCalcError::UnresolvedModel {
            model: "not-a-real-model-xyz".to_string(),
        };
        assert!(err.is_unresolved_model());
        assert_eq!(
            err.to_string(),
            "No encoding known for model 'not-a-real-model-xyz'"
        );
    }

    #[test]
    fn test_unsupported_document_message() {
        let err = TokCalcError::UnsupportedDocument {
            path: PathBuf::from("report.pdf"),
            extension: "pdf".to_string(),
        };
        assert!(!err.is_unresolved_model());
        assert!(err.to_string().contains("report.pdf"));
    }
}
