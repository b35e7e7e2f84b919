//! Pre-fitted regression models
//!
//! Models are loaded from exported parameters and only evaluated here;
//! nothing is fitted at runtime.

use serde::{Deserialize, Serialize};
use truckcare_types::{Error, Result};

use crate::model::FeatureVector;

/// Regression over an encoded feature vector
pub trait Regressor {
    /// Number of input features the model was trained on
    fn n_features(&self) -> usize;

    /// Raw model output for an already length-checked slice
    fn predict_raw(&self, features: &[f64]) -> f64;

    /// Predicted days until next service, floored at zero
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.n_features() {
            return Err(Error::FeatureMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        // f64::max ignores NaN, so a NaN output also floors to zero
        Ok(self.predict_raw(features.as_slice()).max(0.0))
    }
}

/// Marker for leaf nodes in the exported child arrays
const TREE_LEAF: i64 = -1;

/// Exported decision tree in parallel-array form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

/// Serialized model section of the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest {
        n_features: usize,
        trees: Vec<TreeArrays>,
    },
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// Validated regression tree. Rows with `x[feature] <= threshold` go left.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Validate exported arrays. Child indices must point forward so
    /// traversal always terminates.
    pub fn from_arrays(arrays: &TreeArrays, n_features: usize) -> Result<Self> {
        let n = arrays.children_left.len();
        if n == 0 {
            return Err(Error::InvalidArtifact("tree has no nodes".to_string()));
        }
        if arrays.children_right.len() != n
            || arrays.feature.len() != n
            || arrays.threshold.len() != n
            || arrays.value.len() != n
        {
            return Err(Error::InvalidArtifact(
                "tree arrays have different lengths".to_string(),
            ));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = arrays.children_left[i];
            let right = arrays.children_right[i];
            if left == TREE_LEAF && right == TREE_LEAF {
                let value = arrays.value[i];
                if !value.is_finite() {
                    return Err(Error::InvalidArtifact(format!(
                        "leaf {} has non-finite value",
                        i
                    )));
                }
                nodes.push(Node::Leaf(value));
                continue;
            }

            let child_ok = |c: i64| c > i as i64 && (c as usize) < n;
            if !child_ok(left) || !child_ok(right) {
                return Err(Error::InvalidArtifact(format!(
                    "node {} has invalid children ({}, {})",
                    i, left, right
                )));
            }
            let feature = arrays.feature[i];
            if feature < 0 || feature as usize >= n_features {
                return Err(Error::InvalidArtifact(format!(
                    "node {} splits on feature {} but model has {} features",
                    i, feature, n_features
                )));
            }
            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: arrays.threshold[i],
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    /// Callers check the feature width first; `Regressor::predict` does.
    pub(crate) fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Mean of regression trees
#[derive(Debug, Clone)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<RegressionTree>) -> Result<Self> {
        if trees.is_empty() {
            return Err(Error::InvalidArtifact("forest has no trees".to_string()));
        }
        Ok(Self { n_features, trees })
    }
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_raw(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        sum / self.trees.len() as f64
    }
}

#[derive(Debug, Clone)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if coefficients.is_empty() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidArtifact(
                "linear model needs finite coefficients".to_string(),
            ));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_raw(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Any supported regression model
#[derive(Debug, Clone)]
pub enum RegressionModel {
    RandomForest(RandomForest),
    Linear(LinearModel),
}

impl RegressionModel {
    pub fn from_spec(spec: &ModelSpec) -> Result<Self> {
        match spec {
            ModelSpec::RandomForest { n_features, trees } => {
                let trees = trees
                    .iter()
                    .map(|t| RegressionTree::from_arrays(t, *n_features))
                    .collect::<Result<Vec<_>>>()?;
                Ok(RegressionModel::RandomForest(RandomForest::new(
                    *n_features,
                    trees,
                )?))
            }
            ModelSpec::Linear {
                coefficients,
                intercept,
            } => Ok(RegressionModel::Linear(LinearModel::new(
                coefficients.clone(),
                *intercept,
            )?)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RegressionModel::RandomForest(_) => "random_forest",
            RegressionModel::Linear(_) => "linear",
        }
    }
}

impl Regressor for RegressionModel {
    fn n_features(&self) -> usize {
        match self {
            RegressionModel::RandomForest(m) => m.n_features(),
            RegressionModel::Linear(m) => m.n_features(),
        }
    }

    fn predict_raw(&self, features: &[f64]) -> f64 {
        match self {
            RegressionModel::RandomForest(m) => m.predict_raw(features),
            RegressionModel::Linear(m) => m.predict_raw(features),
        }
    }
}
