//! Model Module - bundle loading and inference
//!
//! The bundle carries everything fitted at training time; the engine
//! applies it to one submitted row at a time.

pub mod bundle;
pub mod classifier;
pub mod inference;
pub mod scaler;
pub mod threshold;

// Re-export common types
pub use bundle::{BundleFile, BundleMetadata, ModelBundle};
pub use classifier::{Classifier, Node, Tree};
pub use inference::{EngineStatus, InferenceEngine, PredictionResult};
pub use scaler::Scaler;
pub use threshold::{RiskLabel, THRESHOLD_PERCENT};
