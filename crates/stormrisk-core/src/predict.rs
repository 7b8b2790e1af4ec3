//! What-if prediction from live-adjustable inputs.
//!
//! Live input carries four adjustable weather values; pressure is fixed at
//! 1013 hPa, so the low-pressure indicator is always false for live input.
//! The fitted scaler is applied as-is (never refit). Anything malformed
//! degrades to `Unknown` with zero confidence instead of erroring.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::{RiskLevel, RiskPolicy, N_FEATURES};
use crate::ml::ModelBundle;

/// Placeholder pressure for live input (standard atmosphere).
pub const LIVE_PRESSURE_HPA: f64 = 1013.0;

/// The five live inputs, minus the fixed pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveConditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub rainfall_mm: f64,
}

impl LiveConditions {
    /// Classifier input vector in `FEATURE_NAMES` order, with indicators
    /// recomputed from the same thresholds the deriver uses.
    pub fn feature_vector(&self, policy: &RiskPolicy) -> Vec<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        vec![
            self.temperature_c,
            self.humidity_pct,
            self.wind_speed_kmh,
            self.rainfall_mm,
            LIVE_PRESSURE_HPA,
            flag(policy.is_temp_extreme(self.temperature_c)),
            flag(policy.is_high_wind(self.wind_speed_kmh)),
            flag(policy.is_heavy_rain(self.rainfall_mm)),
            // Pressure is pinned above the low-pressure threshold.
            0.0,
        ]
    }

    fn is_finite(&self) -> bool {
        self.temperature_c.is_finite()
            && self.humidity_pct.is_finite()
            && self.wind_speed_kmh.is_finite()
            && self.rainfall_mm.is_finite()
    }
}

/// Predicted label, with `Unknown` for the degraded path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictedLabel {
    Known(RiskLevel),
    Unknown,
}

impl fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictedLabel::Known(level) => fmt::Display::fmt(level, f),
            PredictedLabel::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Prediction result: label plus the winning class probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: PredictedLabel,
    /// Maximum class probability, in [0, 1]; 0.0 when `Unknown`.
    pub confidence: f64,
}

impl Prediction {
    /// The degraded result: missing or malformed model, or bad input.
    pub fn unknown() -> Self {
        Self {
            label: PredictedLabel::Unknown,
            confidence: 0.0,
        }
    }
}

/// Predict the risk level for live conditions using fitted artifacts.
///
/// Never panics and never errors: a feature-count mismatch between input,
/// scaler, and forest, or a non-finite input, yields `Unknown`.
pub fn predict(bundle: &ModelBundle, input: &LiveConditions, policy: &RiskPolicy) -> Prediction {
    if !input.is_finite() {
        return Prediction::unknown();
    }

    let raw = input.feature_vector(policy);
    if bundle.scaler.n_features() != N_FEATURES || bundle.forest.n_features() != N_FEATURES {
        tracing::warn!(
            scaler_features = bundle.scaler.n_features(),
            forest_features = bundle.forest.n_features(),
            "malformed model bundle, returning Unknown"
        );
        return Prediction::unknown();
    }

    let scaled = bundle.scaler.transform(&raw);
    let vote = bundle.forest.predict_with_votes(&scaled);
    match bundle.labels.decode(vote.class) {
        Some(level) => Prediction {
            label: PredictedLabel::Known(level),
            confidence: vote.confidence,
        },
        None => Prediction::unknown(),
    }
}
