//! Form page handlers

use axum::{extract::State, response::Html, Form};

use crate::views::Outcome;
use crate::{AppResult, AppState};

/// Empty form
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state
        .views
        .index(&[], &Outcome::default(), state.engine.is_loaded())?;
    Ok(page)
}

/// Score the submitted form and re-render the page with the outcome.
/// Domain failures are shown on the page, never as an error status.
pub async fn predict(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let result = state.engine.predict(&fields);

    match &result {
        Ok(prediction) => tracing::info!(
            probability = prediction.probability,
            label = ?prediction.label,
            "Prediction served"
        ),
        Err(e) => tracing::warn!(kind = e.kind(), error = %e, "Prediction failed"),
    }

    let page = state
        .views
        .index(&fields, &Outcome::from_result(result), state.engine.is_loaded())?;
    Ok(page)
}
