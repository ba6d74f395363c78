//! Credit Risk Core
//!
//! Loads a trained credit-default bundle (classifier, fitted scaler and the
//! training column order) and turns raw form fields into a risk assessment.
//!
//! ```text
//! form fields -> coerce -> categoricals -> align(columns) -> scale -> predict_proba -> threshold
//! ```

pub mod error;
pub mod features;
pub mod model;


pub use error::{BundleError, PredictError};
pub use features::{FeatureRow, RawRow, DEFAULT_CATEGORICAL_FIELDS};
pub use model::{
    EngineStatus, InferenceEngine, ModelBundle, PredictionResult, RiskLabel, THRESHOLD_PERCENT,
};
