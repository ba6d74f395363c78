//! Features Module - form input to model-ready rows
//!
//! Coercion, categorical handling and alignment against the training
//! column schema.

pub mod align;
pub mod layout;

pub use align::{align, coerce, encode_categoricals, Alignment, FeatureRow, RawRow};
pub use layout::{ColumnSchema, SchemaInfo};

/// Raw categorical fields expanded into dummy columns at training time.
pub const DEFAULT_CATEGORICAL_FIELDS: &[&str] = &["SEX", "EDUCATION", "MARRIAGE"];
