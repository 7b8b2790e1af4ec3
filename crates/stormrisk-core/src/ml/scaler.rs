//! Per-feature standardization (zero mean, unit variance).
//!
//! Fitted once on training rows, then applied unchanged to validation and
//! live-inference inputs. The fitted transform is deterministic: applying it
//! twice to the same raw vector yields the same standardized vector.

use serde::{Deserialize, Serialize};

/// Fitted standardization parameters, one (mean, std) pair per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit on a rectangular batch of rows (population statistics).
    /// Constant features get std 1.0 so they pass through mean-centred.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let n_features = rows.first().map_or(0, Vec::len);
        let n = rows.len() as f64;

        let mut means = vec![0.0; n_features];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; n_features];
        for row in rows {
            for ((s, v), m) in stds.iter_mut().zip(row).zip(&means) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            if *s < 1e-12 {
                *s = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Standardize one raw vector with the fitted parameters.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((v, m), s)| (v - m) / s)
            .collect()
    }

    /// Standardize a batch of rows.
    pub fn transform_batch(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform(r)).collect()
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}
