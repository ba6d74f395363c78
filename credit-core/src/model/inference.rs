//! Inference Engine
//!
//! Owns the loaded bundle (or the reason it could not be loaded) and runs
//! the request path: coerce, consume categoricals, align, scale, predict,
//! threshold. Built once at startup and shared read-only.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::bundle::ModelBundle;
use super::threshold::RiskLabel;
use crate::error::PredictError;
use crate::features::{align, coerce, encode_categoricals, FeatureRow, DEFAULT_CATEGORICAL_FIELDS};

/// Outcome of one prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Default probability in percent, 0.0 - 100.0
    pub probability: f64,
    pub label: RiskLabel,
}

impl PredictionResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            label: RiskLabel::from_probability(probability),
        }
    }

    /// e.g. "62.35%"
    pub fn probability_text(&self) -> String {
        format!("{:.2}%", self.probability)
    }

    pub fn message(&self) -> &'static str {
        self.label.message()
    }
}

/// Engine status for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub source: Option<String>,
    pub classifier: Option<String>,
    pub feature_count: usize,
    pub schema_hash: Option<String>,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub error: Option<String>,
}

#[derive(Debug)]
enum ModelState {
    Ready(ModelBundle),
    Unavailable(String),
}

#[derive(Debug)]
pub struct InferenceEngine {
    model: ModelState,
    categorical: Vec<String>,
}

impl InferenceEngine {
    pub fn from_bundle(bundle: ModelBundle) -> Self {
        Self {
            model: ModelState::Ready(bundle),
            categorical: default_categorical(),
        }
    }

    /// Engine whose every prediction fails with `ModelUnavailable`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: ModelState::Unavailable(reason.into()),
            categorical: default_categorical(),
        }
    }

    /// Load the bundle at `path`. Never fails: a broken or missing artifact
    /// yields an engine that reports itself unavailable.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        log::info!("Loading model bundle from: {}", path.display());

        match ModelBundle::load(path) {
            Ok(bundle) => {
                let meta = bundle.metadata();
                log::info!(
                    "Model bundle loaded successfully ({}, {} features, schema {:08x})",
                    meta.classifier,
                    meta.feature_count,
                    meta.schema_hash
                );
                Self::from_bundle(bundle)
            }
            Err(e) => {
                log::error!("Failed to load model bundle: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Raw categorical fields consumed before alignment
    pub fn with_categorical_fields(mut self, fields: Vec<String>) -> Self {
        self.categorical = fields;
        self
    }

    pub fn categorical_fields(&self) -> &[String] {
        &self.categorical
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.model, ModelState::Ready(_))
    }

    pub fn bundle(&self) -> Option<&ModelBundle> {
        match &self.model {
            ModelState::Ready(bundle) => Some(bundle),
            ModelState::Unavailable(_) => None,
        }
    }

    fn require_bundle(&self) -> Result<&ModelBundle, PredictError> {
        match &self.model {
            ModelState::Ready(bundle) => Ok(bundle),
            ModelState::Unavailable(reason) => Err(PredictError::ModelUnavailable(reason.clone())),
        }
    }

    pub fn status(&self) -> EngineStatus {
        match &self.model {
            ModelState::Ready(bundle) => {
                let meta = bundle.metadata();
                EngineStatus {
                    model_loaded: true,
                    source: Some(meta.source.clone()),
                    classifier: Some(meta.classifier.clone()),
                    feature_count: meta.feature_count,
                    schema_hash: Some(format!("{:08x}", meta.schema_hash)),
                    loaded_at: Some(meta.loaded_at),
                    error: None,
                }
            }
            ModelState::Unavailable(reason) => EngineStatus {
                model_loaded: false,
                source: None,
                classifier: None,
                feature_count: 0,
                schema_hash: None,
                loaded_at: None,
                error: Some(reason.clone()),
            },
        }
    }

    /// Turn submitted fields into a row matching the training schema.
    pub fn prepare<K, V>(&self, fields: &[(K, V)]) -> Result<FeatureRow, PredictError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = coerce(fields)?;
        let bundle = self.require_bundle()?;

        let consumed = encode_categoricals(&mut raw, &self.categorical);
        if !consumed.is_empty() {
            log::debug!("Consumed raw categorical fields: {:?}", consumed);
        }

        let alignment = align(&raw, bundle.columns());
        if !alignment.filled.is_empty() {
            log::warn!(
                "Filled {} missing column(s) with 0: {:?}",
                alignment.filled.len(),
                alignment.filled
            );
        }
        if !alignment.dropped.is_empty() {
            log::debug!("Dropped fields not in schema: {:?}", alignment.dropped);
        }

        Ok(alignment.row)
    }

    /// Full request path, from form fields to a labelled probability.
    pub fn predict<K, V>(&self, fields: &[(K, V)]) -> Result<PredictionResult, PredictError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let row = self.prepare(fields)?;
        let bundle = self.require_bundle()?;

        row.ensure_finite()?;
        let scaled = bundle.scaler().transform(row.to_array().view())?;
        let proba = bundle.classifier().predict_proba(scaled.view())?;

        let result = PredictionResult::from_probability(proba[1] * 100.0);
        log::debug!(
            "Prediction: {:.2}% ({:?})",
            result.probability,
            result.label
        );

        Ok(result)
    }
}

fn default_categorical() -> Vec<String> {
    DEFAULT_CATEGORICAL_FIELDS.iter().map(|s| s.to_string()).collect()
}
