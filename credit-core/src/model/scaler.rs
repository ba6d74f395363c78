//! Fitted feature scalers
//!
//! Parameters are exported from the training pipeline; transforms follow the
//! usual fitted-scaler semantics (zero spread is treated as 1, no clipping).

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, PredictError};

/// Scaler stored in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard {
        #[serde(default)]
        mean: Option<Vec<f64>>,
        #[serde(default)]
        scale: Option<Vec<f64>>,
    },
    /// Linear map of `[data_min, data_max]` onto `feature_range`
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
    Identity,
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

impl Scaler {
    /// Number of features the scaler was fitted on, if it records one
    pub fn n_features(&self) -> Option<usize> {
        match self {
            Scaler::Standard { mean, scale } => mean
                .as_ref()
                .map(Vec::len)
                .or_else(|| scale.as_ref().map(Vec::len)),
            Scaler::MinMax { data_min, .. } => Some(data_min.len()),
            Scaler::Identity => None,
        }
    }

    /// Check internal consistency against the bundle's column count.
    pub fn validate(&self, n_columns: usize) -> Result<(), BundleError> {
        let check = |what: &str, len: usize| {
            if len == n_columns {
                Ok(())
            } else {
                Err(BundleError::Schema(format!(
                    "scaler {} has {} entries, expected {}",
                    what, len, n_columns
                )))
            }
        };

        match self {
            Scaler::Standard { mean, scale } => {
                if let Some(mean) = mean {
                    check("mean", mean.len())?;
                }
                if let Some(scale) = scale {
                    check("scale", scale.len())?;
                }
            }
            Scaler::MinMax { data_min, data_max, feature_range } => {
                check("data_min", data_min.len())?;
                check("data_max", data_max.len())?;
                if feature_range.0 >= feature_range.1 {
                    return Err(BundleError::Schema(format!(
                        "scaler feature_range ({}, {}) is empty",
                        feature_range.0, feature_range.1
                    )));
                }
            }
            Scaler::Identity => {}
        }

        Ok(())
    }

    /// Apply the fitted transform to one row, keeping column order.
    pub fn transform(&self, row: ArrayView1<f64>) -> Result<Array1<f64>, PredictError> {
        if let Some(expected) = self.n_features() {
            if row.len() != expected {
                return Err(PredictError::InferenceFailure(format!(
                    "scaler expects {} features, got {}",
                    expected,
                    row.len()
                )));
            }
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => {
                let mut out = row.to_owned();
                if let Some(mean) = mean {
                    out -= &ArrayView1::from(mean.as_slice());
                }
                if let Some(scale) = scale {
                    let scale = Array1::from_iter(scale.iter().map(|&s| non_zero(s)));
                    out /= &scale;
                }
                out
            }
            Scaler::MinMax { data_min, data_max, feature_range } => {
                let (lo, hi) = *feature_range;
                Array1::from_iter(row.iter().zip(data_min.iter().zip(data_max)).map(
                    |(&x, (&min, &max))| {
                        let s = (hi - lo) / non_zero(max - min);
                        x * s + (lo - min * s)
                    },
                ))
            }
            Scaler::Identity => row.to_owned(),
        };

        Ok(scaled)
    }
}

fn non_zero(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_transform() {
        let scaler = Scaler::Standard {
            mean: Some(vec![30.0, 50000.0]),
            scale: Some(vec![10.0, 25000.0]),
        };
        let out = scaler.transform(array![40.0, 0.0].view()).unwrap();
        assert_eq!(out, array![1.0, -2.0]);
    }

    #[test]
    fn test_standard_zero_scale_is_one() {
        let scaler = Scaler::Standard {
            mean: Some(vec![1.0]),
            scale: Some(vec![0.0]),
        };
        let out = scaler.transform(array![3.0].view()).unwrap();
        assert_eq!(out, array![2.0]);
    }

    #[test]
    fn test_min_max_transform() {
        let scaler = Scaler::MinMax {
            data_min: vec![0.0, 10.0],
            data_max: vec![10.0, 10.0],
            feature_range: (0.0, 1.0),
        };
        let out = scaler.transform(array![5.0, 12.0].view()).unwrap();
        assert!((out[0] - 0.5).abs() < 1e-12);
        // zero range: shift only
        assert!((out[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_does_not_clip() {
        let scaler = Scaler::MinMax {
            data_min: vec![0.0],
            data_max: vec![10.0],
            feature_range: (0.0, 1.0),
        };
        let out = scaler.transform(array![20.0].view()).unwrap();
        assert!((out[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let scaler = Scaler::Standard {
            mean: Some(vec![0.0, 0.0]),
            scale: None,
        };
        let result = scaler.transform(array![1.0].view());
        assert!(matches!(result, Err(PredictError::InferenceFailure(_))));
    }

    #[test]
    fn test_validate() {
        let scaler = Scaler::Standard {
            mean: Some(vec![0.0; 3]),
            scale: Some(vec![1.0; 2]),
        };
        assert!(scaler.validate(3).is_err());
        assert!(Scaler::Identity.validate(3).is_ok());
    }

    #[test]
    fn test_deserialize_tagged() {
        let scaler: Scaler =
            serde_json::from_str(r#"{"kind":"min_max","data_min":[0],"data_max":[1]}"#).unwrap();
        assert_eq!(
            scaler,
            Scaler::MinMax {
                data_min: vec![0.0],
                data_max: vec![1.0],
                feature_range: (0.0, 1.0),
            }
        );
    }
}
