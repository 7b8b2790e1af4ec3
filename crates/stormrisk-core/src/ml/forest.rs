//! Bagged ensemble of CART trees with majority voting.
//!
//! Each tree trains on a bootstrap sample with √n-feature split candidates,
//! driven by its own seed derived from the forest seed, so the fitted forest
//! is identical whether or not the `threading` feature is enabled.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "threading")]
use rayon::prelude::*;

use super::tree::{DecisionTree, TreeParams};

/// Ensemble hyperparameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    /// Per-tree depth cap; `None` grows to purity.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

/// Prediction with per-class vote detail.
#[derive(Debug, Clone)]
pub struct ForestPrediction {
    /// Majority-vote class index.
    pub class: usize,
    /// Vote count per class.
    pub votes: Vec<usize>,
    /// Fraction of trees voting for the winning class, in [0, 1].
    pub confidence: f64,
}

/// A fitted random forest classifier.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
    /// Normalized mean impurity decrease per feature; sums to 1.
    importance: Vec<f64>,
}

impl RandomForest {
    /// Fit `params.n_trees` trees on bootstrap samples of `x`/`y`.
    /// `x` must be non-empty and rectangular; `y` holds encoded class
    /// indices below `n_classes`.
    pub fn fit(x: &[Vec<f64>], y: &[usize], n_classes: usize, params: &ForestParams, seed: u64) -> Self {
        let n = x.len();
        let n_features = x.first().map_or(0, Vec::len);
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            n_split_features: ((n_features as f64).sqrt().floor() as usize).max(1),
        };

        let fit_one = |t: usize| {
            let mut rng = StdRng::seed_from_u64(tree_seed(seed, t));
            let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            DecisionTree::fit(x, y, &bootstrap, n_classes, &tree_params, &mut rng)
        };

        #[cfg(feature = "threading")]
        let fits: Vec<(DecisionTree, Vec<f64>)> =
            (0..params.n_trees).into_par_iter().map(fit_one).collect();
        #[cfg(not(feature = "threading"))]
        let fits: Vec<(DecisionTree, Vec<f64>)> = (0..params.n_trees).map(fit_one).collect();

        let mut importance = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(fits.len());
        for (tree, contribution) in fits {
            for (total, c) in importance.iter_mut().zip(&contribution) {
                *total += c;
            }
            trees.push(tree);
        }
        normalize(&mut importance);

        Self {
            trees,
            n_features,
            n_classes,
            importance,
        }
    }

    /// Predict one sample with vote detail.
    pub fn predict_with_votes(&self, features: &[f64]) -> ForestPrediction {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            let class = tree.predict(features);
            if class < self.n_classes {
                votes[class] += 1;
            }
        }
        let (class, &max_votes) = votes
            .iter()
            .enumerate()
            .max_by_key(|(_, &v)| v)
            .unwrap_or((0, &0));
        let confidence = if self.trees.is_empty() {
            0.0
        } else {
            max_votes as f64 / self.trees.len() as f64
        };
        ForestPrediction {
            class,
            votes,
            confidence,
        }
    }

    /// Predict one sample, majority vote only.
    pub fn predict(&self, features: &[f64]) -> usize {
        self.predict_with_votes(features).class
    }

    /// Normalized per-feature importance, one entry per input feature.
    pub fn feature_importance(&self) -> &[f64] {
        &self.importance
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// Per-tree seed: splitmix-style spread of the forest seed.
fn tree_seed(seed: u64, tree: usize) -> u64 {
    seed ^ (tree as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Scale to sum 1; a forest with no splits anywhere gets uniform weights.
fn normalize(importance: &mut [f64]) {
    let total: f64 = importance.iter().sum();
    if total > 0.0 {
        for v in importance.iter_mut() {
            *v /= total;
        }
    } else if !importance.is_empty() {
        let uniform = 1.0 / importance.len() as f64;
        for v in importance.iter_mut() {
            *v = uniform;
        }
    }
}
