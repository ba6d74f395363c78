//! JSON prediction API

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use credit_core::{PredictionResult, RiskLabel};

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub probability: f64,
    pub probability_text: String,
    pub high_risk: bool,
    pub label: RiskLabel,
    pub message: &'static str,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            probability: result.probability,
            probability_text: result.probability_text(),
            high_risk: result.label.is_high_risk(),
            label: result.label,
            message: result.message(),
        }
    }
}

/// Score a JSON object of field -> number or numeric string
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> AppResult<Json<PredictResponse>> {
    let fields = body
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(s) => Ok((name, s)),
            Value::Number(n) => Ok((name, n.to_string())),
            other => Err(AppError::ValidationError(format!(
                "field '{}' must be a number or a string, got {}",
                name, other
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let result = state.engine.predict(&fields)?;
    tracing::debug!(probability = result.probability, "API prediction served");

    Ok(Json(result.into()))
}
