//! CART decision tree: gini-impurity training and inference.
//!
//! Flat arena of nodes; `features <= threshold` routes left. Each fitted tree
//! also reports its unnormalized impurity-decrease contribution per feature,
//! which the forest sums and normalizes into the importance mapping.

use rand::rngs::StdRng;
use rand::seq::index::sample;

/// Growth limits for a single tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until pure or unsplittable.
    pub max_depth: Option<usize>,
    /// Nodes with fewer rows become leaves.
    pub min_samples_split: usize,
    /// Number of candidate features examined per split.
    pub n_split_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted decision tree classifier.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

impl DecisionTree {
    /// Fit on the rows of `x`/`y` selected by `indices` (repeats allowed, so
    /// a bootstrap sample is just an index list). Returns the tree and its
    /// per-feature impurity-decrease totals.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        indices: &[usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> (Self, Vec<f64>) {
        let n_features = x.first().map_or(0, Vec::len);
        let mut grower = Grower {
            x,
            y,
            n_classes,
            params,
            n_total: indices.len() as f64,
            nodes: Vec::new(),
            importance: vec![0.0; n_features],
        };
        grower.grow(indices.to_vec(), 0, rng);
        (
            Self {
                nodes: grower.nodes,
                n_features,
            },
            grower.importance,
        )
    }

    /// Classify one sample by root-to-leaf traversal.
    pub fn predict(&self, features: &[f64]) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if v <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }
}

/// Best split found for one node.
struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Parent gini minus size-weighted child gini.
    gain: f64,
}

struct Grower<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_classes: usize,
    params: &'a TreeParams,
    n_total: f64,
    nodes: Vec<Node>,
    importance: Vec<f64>,
}

impl Grower<'_> {
    /// Grow the subtree over `indices`, returning its root node index.
    fn grow(&mut self, indices: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let counts = self.class_counts(&indices);
        let majority = argmax(&counts);

        let at_depth_limit = self.params.max_depth.is_some_and(|d| depth >= d);
        let too_small = indices.len() < self.params.min_samples_split;
        if at_depth_limit || too_small || is_pure(&counts) {
            return self.push_leaf(majority);
        }

        let Some(best) = self.best_split(&indices, &counts, rng) else {
            // All candidate features constant on this node.
            return self.push_leaf(majority);
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.x[i][best.feature] <= best.threshold);

        // Mean decrease in impurity, weighted by node share: N_node / N_total × gain.
        self.importance[best.feature] += indices.len() as f64 / self.n_total * best.gain;

        let node = self.nodes.len();
        self.nodes.push(Node::Leaf { class: majority }); // placeholder
        let left = self.grow(left_idx, depth + 1, rng);
        let right = self.grow(right_idx, depth + 1, rng);
        self.nodes[node] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node
    }

    fn push_leaf(&mut self, class: usize) -> usize {
        self.nodes.push(Node::Leaf { class });
        self.nodes.len() - 1
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    /// Search a random feature subset for the gini-optimal threshold.
    fn best_split(
        &self,
        indices: &[usize],
        parent_counts: &[usize],
        rng: &mut StdRng,
    ) -> Option<BestSplit> {
        let n_features = self.importance.len();
        let n = indices.len();
        let parent_gini = gini(parent_counts, n);

        let k = self.params.n_split_features.clamp(1, n_features);
        let candidates = sample(rng, n_features, k);

        let mut best: Option<BestSplit> = None;
        for feature in candidates {
            let mut vals: Vec<(f64, usize)> =
                indices.iter().map(|&i| (self.x[i][feature], self.y[i])).collect();
            vals.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = vec![0usize; self.n_classes];
            let mut right = parent_counts.to_vec();
            for cut in 0..n - 1 {
                let (v, class) = vals[cut];
                left[class] += 1;
                right[class] -= 1;
                // Only cut between distinct values.
                if vals[cut + 1].0 <= v {
                    continue;
                }
                let n_left = cut + 1;
                let n_right = n - n_left;
                let weighted = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini(&right, n_right))
                    / n as f64;
                let gain = parent_gini - weighted;
                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (v + vals[cut + 1].0) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let t = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / t;
            p * p
        })
        .sum::<f64>()
}

fn is_pure(counts: &[usize]) -> bool {
    counts.iter().filter(|&&c| c > 0).count() <= 1
}

fn argmax(counts: &[usize]) -> usize {
    counts
        .iter()
        .enumerate()
        .max_by_key(|(_, &c)| c)
        .map_or(0, |(i, _)| i)
}
