//! Isolation forest anomaly detector.
//!
//! Points that are easy to isolate with random axis-aligned splits sit on
//! short paths and receive scores close to `-1`; typical points score closer
//! to `-0.5`. The decision offset is chosen so that a `contamination`
//! fraction of the training rows falls on the outlier side.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::{MLError, feature_width};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Hyperparameters for [`IsolationForest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForestConfig {
    /// Number of trees in the ensemble.
    pub n_estimators: usize,
    /// Rows drawn (without replacement) per tree, capped at the row count.
    pub max_samples: usize,
    /// Expected share of outliers in the training data, in `(0, 0.5]`.
    pub contamination: f64,
    /// Seed for the master random number generator.
    pub random_state: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_samples: 256,
            contamination: 0.3,
            random_state: 42,
        }
    }
}

/// Whether a point falls inside or outside the learned distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlier {
    Inlier,
    Outlier,
}

impl Outlier {
    /// `1` for inliers, `-1` for outliers.
    pub fn as_i8(self) -> i8 {
        match self {
            Outlier::Inlier => 1,
            Outlier::Outlier => -1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum IsolationNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<IsolationNode>,
        right: Box<IsolationNode>,
    },
    Leaf {
        size: usize,
    },
}

/// A single isolation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IsolationTree {
    root: IsolationNode,
}

impl IsolationTree {
    fn fit(data: &[Vec<f64>], rows: Vec<usize>, max_depth: usize, rng: &mut StdRng) -> Self {
        Self {
            root: Self::build(data, rows, 0, max_depth, rng),
        }
    }

    fn build(
        data: &[Vec<f64>],
        rows: Vec<usize>,
        depth: usize,
        max_depth: usize,
        rng: &mut StdRng,
    ) -> IsolationNode {
        if rows.len() <= 1 || depth >= max_depth {
            return IsolationNode::Leaf { size: rows.len() };
        }

        // (feature, min, max) for every feature that still varies in this node.
        let n_features = data[rows[0]].len();
        let candidates: Vec<(usize, f64, f64)> = (0..n_features)
            .filter_map(|feature| {
                let (min, max) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, &r| {
                    let v = data[r][feature];
                    (acc.0.min(v), acc.1.max(v))
                });
                (min < max).then_some((feature, min, max))
            })
            .collect();

        if candidates.is_empty() {
            return IsolationNode::Leaf { size: rows.len() };
        }

        let (feature, min, max) = candidates[rng.random_range(0..candidates.len())];
        let threshold = rng.random_range(min..max);
        let (left, right): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| data[r][feature] <= threshold);

        IsolationNode::Split {
            feature,
            threshold,
            left: Box::new(Self::build(data, left, depth + 1, max_depth, rng)),
            right: Box::new(Self::build(data, right, depth + 1, max_depth, rng)),
        }
    }

    fn path_length(&self, x: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                IsolationNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                    depth += 1.0;
                }
                IsolationNode::Leaf { size } => return depth + average_path_length(*size),
            }
        }
    }
}

/// Average path length of an unsuccessful binary-search-tree lookup over `n` points.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile (`q` in `[0, 100]`) of unsorted values.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = q.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Isolation forest anomaly detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForest {
    config: IsolationForestConfig,
    trees: Vec<IsolationTree>,
    /// Rows actually drawn per tree.
    samples_per_tree: usize,
    /// Threshold on `score_samples` separating outliers from inliers.
    offset: f64,
    n_features: usize,
}

impl IsolationForest {
    pub fn new(config: IsolationForestConfig) -> Result<Self> {
        if config.n_estimators == 0 {
            return Err(MLError::InvalidParameter {
                message: "n_estimators must be positive".to_string(),
            }
            .into());
        }
        // One-row trees have an expected path length of 0, and scores become NaN.
        if config.max_samples < 2 {
            return Err(MLError::InvalidParameter {
                message: format!("max_samples must be at least 2, got {}", config.max_samples),
            }
            .into());
        }
        if !(config.contamination > 0.0 && config.contamination <= 0.5) {
            return Err(MLError::InvalidParameter {
                message: format!(
                    "contamination must be in (0, 0.5], got {}",
                    config.contamination
                ),
            }
            .into());
        }
        Ok(Self {
            config,
            trees: Vec::new(),
            samples_per_tree: 0,
            offset: 0.0,
            n_features: 0,
        })
    }

    /// Fit the forest on feature rows `x`.
    ///
    /// Per-tree seeds are drawn up front from the master generator, so the
    /// fitted forest is the same however rayon schedules the trees.
    pub fn fit(&mut self, x: &[Vec<f64>]) -> Result<()> {
        if x.len() < 2 {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 2,
                actual: x.len(),
            }
            .into());
        }
        let n_features = feature_width(x)?;
        let samples_per_tree = self.config.max_samples.min(x.len());
        let max_depth = (samples_per_tree as f64).log2().ceil() as usize;

        let mut rng = StdRng::seed_from_u64(self.config.random_state);
        let seeds: Vec<u64> = (0..self.config.n_estimators)
            .map(|_| rng.random())
            .collect();

        self.trees = seeds
            .into_par_iter()
            .map(|seed| {
                let mut tree_rng = StdRng::seed_from_u64(seed);
                let rows =
                    rand::seq::index::sample(&mut tree_rng, x.len(), samples_per_tree).into_vec();
                IsolationTree::fit(x, rows, max_depth, &mut tree_rng)
            })
            .collect();
        self.samples_per_tree = samples_per_tree;
        self.n_features = n_features;

        let training_scores = x
            .iter()
            .map(|row| self.score_samples(row))
            .collect::<Result<Vec<_>>>()?;
        self.offset = percentile(&training_scores, 100.0 * self.config.contamination);

        log::debug!(
            "fitted isolation forest: {} trees, {} samples per tree, offset {:.4}",
            self.trees.len(),
            samples_per_tree,
            self.offset
        );
        Ok(())
    }

    /// Anomaly score in `[-1, 0)`; lower is more anomalous.
    pub fn score_samples(&self, x: &[f64]) -> Result<f64> {
        self.check_input(x)?;
        let mean_path = self
            .trees
            .iter()
            .map(|tree| tree.path_length(x))
            .sum::<f64>()
            / self.trees.len() as f64;
        let normalizer = average_path_length(self.samples_per_tree);
        Ok(-(2.0f64).powf(-mean_path / normalizer))
    }

    /// `score_samples(x) - offset`; negative means outlier.
    pub fn decision_function(&self, x: &[f64]) -> Result<f64> {
        Ok(self.score_samples(x)? - self.offset)
    }

    pub fn predict(&self, x: &[f64]) -> Result<Outlier> {
        Ok(if self.decision_function(x)? < 0.0 {
            Outlier::Outlier
        } else {
            Outlier::Inlier
        })
    }

    fn check_input(&self, x: &[f64]) -> Result<()> {
        if self.trees.is_empty() {
            return Err(MLError::NotFitted {
                model: "IsolationForest".to_string(),
            }
            .into());
        }
        if x.len() != self.n_features {
            return Err(MLError::DimensionMismatch {
                expected: self.n_features,
                actual: x.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn config(&self) -> &IsolationForestConfig {
        &self.config
    }
}
