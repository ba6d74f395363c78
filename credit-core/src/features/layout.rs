//! Column Schema - training-time feature order
//!
//! The bundle's column list is the single source of truth for both the set
//! of accepted features and the order fed to the scaler and classifier.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::BundleError;

/// Ordered, duplicate-free list of feature names
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    names: Vec<String>,
}

impl ColumnSchema {
    pub fn new(names: Vec<String>) -> Result<Self, BundleError> {
        if names.is_empty() {
            return Err(BundleError::Schema("column list is empty".to_string()));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(BundleError::Schema(format!("duplicate column '{}'", name)));
            }
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column (O(n), schemas are small)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// CRC32 over the ordered names. Changes when a column is added,
    /// removed, renamed or moved.
    pub fn hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for name in &self.names {
            hasher.update(name.as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }

    pub fn info(&self) -> SchemaInfo {
        SchemaInfo {
            hash: self.hash(),
            feature_count: self.len(),
            feature_names: self.names.clone(),
        }
    }
}

/// Schema summary for logging and status reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}
