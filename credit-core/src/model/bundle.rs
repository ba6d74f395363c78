//! Model Bundle - classifier, fitted scaler and training column order
//!
//! The bundle is one JSON document produced by the training pipeline.
//! It is validated as a whole when loaded and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::classifier::Classifier;
use super::scaler::Scaler;
use crate::error::BundleError;
use crate::features::ColumnSchema;

/// On-disk layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleFile {
    pub columns: Vec<String>,
    pub scaler: Scaler,
    pub classifier: Classifier,
}

/// Where and when a bundle was loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub source: String,
    pub classifier: String,
    pub feature_count: usize,
    pub schema_hash: u32,
    pub loaded_at: DateTime<Utc>,
}

/// Validated, immutable model bundle
#[derive(Debug, Clone)]
pub struct ModelBundle {
    classifier: Classifier,
    scaler: Scaler,
    schema: ColumnSchema,
    metadata: BundleMetadata,
}

impl ModelBundle {
    /// Build a bundle from its parts, checking that they agree.
    pub fn new(
        columns: Vec<String>,
        scaler: Scaler,
        classifier: Classifier,
    ) -> Result<Self, BundleError> {
        Self::from_parts(
            BundleFile { columns, scaler, classifier },
            "<memory>".to_string(),
        )
    }

    /// Read and validate a bundle file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let text = std::fs::read_to_string(path).map_err(|e| BundleError::Io {
            path: source.clone(),
            source: e,
        })?;

        Self::from_json(&text, source)
    }

    pub fn from_json(text: &str, source: String) -> Result<Self, BundleError> {
        let file: BundleFile = serde_json::from_str(text).map_err(|e| BundleError::Parse {
            path: source.clone(),
            source: e,
        })?;

        Self::from_parts(file, source)
    }

    fn from_parts(file: BundleFile, source: String) -> Result<Self, BundleError> {
        let schema = ColumnSchema::new(file.columns)?;
        file.scaler.validate(schema.len())?;
        file.classifier.validate(schema.len())?;

        let metadata = BundleMetadata {
            source,
            classifier: file.classifier.name().to_string(),
            feature_count: schema.len(),
            schema_hash: schema.hash(),
            loaded_at: Utc::now(),
        };

        Ok(Self {
            classifier: file.classifier,
            scaler: file.scaler,
            schema,
            metadata,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn columns(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn metadata(&self) -> &BundleMetadata {
        &self.metadata
    }
}
