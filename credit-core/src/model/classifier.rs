//! Classifiers
//!
//! Binary classifiers exported from the training pipeline. All of them
//! expose `predict_proba`, returning `[p(negative), p(positive)]` where the
//! positive class is "default".

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, PredictError};

/// Classifier stored in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
    },
    DecisionTree(Tree),
    /// Mean of the per-tree probabilities
    RandomForest {
        trees: Vec<Tree>,
    },
}

/// Array-encoded binary tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// `x[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Positive-class probability
    Leaf { value: f64 },
}

impl Classifier {
    pub fn name(&self) -> &'static str {
        match self {
            Classifier::LogisticRegression { .. } => "logistic_regression",
            Classifier::DecisionTree(_) => "decision_tree",
            Classifier::RandomForest { .. } => "random_forest",
        }
    }

    /// Check internal consistency against the bundle's column count.
    pub fn validate(&self, n_columns: usize) -> Result<(), BundleError> {
        match self {
            Classifier::LogisticRegression { coef, intercept } => {
                if coef.len() != n_columns {
                    return Err(BundleError::Schema(format!(
                        "classifier has {} coefficients, expected {}",
                        coef.len(),
                        n_columns
                    )));
                }
                if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
                    return Err(BundleError::Schema(
                        "classifier parameters must be finite".to_string(),
                    ));
                }
                Ok(())
            }
            Classifier::DecisionTree(tree) => tree.validate(n_columns),
            Classifier::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(BundleError::Schema("random forest has no trees".to_string()));
                }
                trees.iter().try_for_each(|t| t.validate(n_columns))
            }
        }
    }

    /// Class probabilities for one scaled row.
    pub fn predict_proba(&self, x: ArrayView1<f64>) -> Result<[f64; 2], PredictError> {
        let positive = match self {
            Classifier::LogisticRegression { coef, intercept } => {
                if x.len() != coef.len() {
                    return Err(PredictError::InferenceFailure(format!(
                        "classifier expects {} features, got {}",
                        coef.len(),
                        x.len()
                    )));
                }
                sigmoid(ArrayView1::from(coef.as_slice()).dot(&x) + intercept)
            }
            Classifier::DecisionTree(tree) => tree.leaf_value(x)?,
            Classifier::RandomForest { trees } => {
                let mut sum = 0.0;
                for tree in trees {
                    sum += tree.leaf_value(x)?;
                }
                sum / trees.len() as f64
            }
        };

        if !(0.0..=1.0).contains(&positive) {
            return Err(PredictError::InferenceFailure(format!(
                "classifier produced invalid probability {}",
                positive
            )));
        }

        Ok([1.0 - positive, positive])
    }
}

impl Tree {
    fn validate(&self, n_columns: usize) -> Result<(), BundleError> {
        if self.nodes.is_empty() {
            return Err(BundleError::Schema("tree has no nodes".to_string()));
        }

        let n_nodes = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split { feature, threshold, left, right } => {
                    if feature >= n_columns {
                        return Err(BundleError::Schema(format!(
                            "tree node {} splits on feature {}, only {} columns",
                            i, feature, n_columns
                        )));
                    }
                    // Children must point forward, which also rules out cycles
                    if left <= i || right <= i || left >= n_nodes || right >= n_nodes {
                        return Err(BundleError::Schema(format!(
                            "tree node {} has invalid children ({}, {})",
                            i, left, right
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(BundleError::Schema(format!("tree node {} threshold is NaN", i)));
                    }
                }
                Node::Leaf { value } => {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(BundleError::Schema(format!(
                            "tree leaf {} value {} is not a probability",
                            i, value
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn leaf_value(&self, x: ArrayView1<f64>) -> Result<f64, PredictError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split { feature, threshold, left, right }) => {
                    let v = x.get(*feature).ok_or_else(|| {
                        PredictError::InferenceFailure(format!(
                            "tree needs feature {}, row has {}",
                            feature,
                            x.len()
                        ))
                    })?;
                    idx = if *v <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(PredictError::InferenceFailure(format!(
                        "tree node {} does not exist",
                        idx
                    )))
                }
            }
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
