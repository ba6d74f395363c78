//! Error types

use thiserror::Error;

/// Failure while loading a model bundle from disk.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("cannot read bundle {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse bundle {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Components inside the bundle disagree with each other.
    #[error("bundle schema mismatch: {0}")]
    Schema(String),
}

/// Failure of a single prediction request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("could not convert value '{value}' of field '{field}' to a number")]
    InvalidInput { field: String, value: String },

    #[error("model is not available: {0}")]
    ModelUnavailable(String),

    #[error("inference failed: {0}")]
    InferenceFailure(String),
}

impl PredictError {
    /// Stable machine-readable tag
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::InvalidInput { .. } => "invalid_input",
            PredictError::ModelUnavailable(_) => "model_unavailable",
            PredictError::InferenceFailure(_) => "inference_failure",
        }
    }
}
