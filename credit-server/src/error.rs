//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credit_core::PredictError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Prediction errors
    #[error("{0}")]
    Prediction(#[from] PredictError),

    // Validation errors
    #[error("{0}")]
    ValidationError(String),

    // Rendering errors
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Prediction(e) => e.kind(),
            AppError::ValidationError(_) => "validation_error",
            AppError::Template(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Prediction(err @ PredictError::InvalidInput { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Prediction(err @ PredictError::ModelUnavailable(_)) => {
                tracing::warn!("Prediction requested without a model: {}", err);
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            AppError::Prediction(err @ PredictError::InferenceFailure(_)) => {
                tracing::error!("Inference error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Template(err) => {
                tracing::error!("Template error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "kind": self.kind(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
