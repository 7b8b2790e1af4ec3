//! Request-scoped session: the loaded tables, policy, trainer config, and
//! the current fitted bundle, passed explicitly into each computation.
//!
//! Execution is single-threaded and synchronous: `retrain` re-runs the whole
//! derive-and-train pipeline and replaces the bundle; nothing is updated
//! incrementally and nothing persists across sessions.

use crate::data::Dataset;
use crate::error::Result;
use crate::features::{derive_features, FeatureTable, RiskPolicy};
use crate::ml::{train, ModelBundle, TrainOutcome, TrainerConfig};
use crate::patterns::{analyze_patterns, PatternObservation};
use crate::predict::{predict, LiveConditions, Prediction};

/// Session state for one user interaction sequence.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    policy: RiskPolicy,
    trainer: TrainerConfig,
    model: Option<ModelBundle>,
}

impl Session {
    pub fn new(dataset: Dataset, policy: RiskPolicy, trainer: TrainerConfig) -> Self {
        Self {
            dataset,
            policy,
            trainer,
            model: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// The fitted bundle from the latest successful `retrain`, if any.
    pub fn model(&self) -> Option<&ModelBundle> {
        self.model.as_ref()
    }

    /// Derive the labeled feature table from the session's tables.
    pub fn derive(&self) -> FeatureTable {
        derive_features(&self.dataset.weather, &self.dataset.disasters, &self.policy)
    }

    /// Run the full pipeline and replace the session's fitted bundle. A
    /// degraded outcome clears the bundle so stale artifacts are never used.
    pub fn retrain(&mut self) -> Result<TrainOutcome> {
        let table = self.derive();
        let outcome = train(&table, &self.trainer)?;
        self.model = outcome.bundle().cloned();
        Ok(outcome)
    }

    /// What-if prediction with the current bundle; `Unknown` when untrained.
    pub fn predict(&self, input: &LiveConditions) -> Prediction {
        match &self.model {
            Some(bundle) => predict(bundle, input, &self.policy),
            None => Prediction::unknown(),
        }
    }

    /// Descriptive risk patterns over the current feature table.
    pub fn patterns(&self) -> Vec<PatternObservation> {
        analyze_patterns(&self.derive(), &self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthesize_dataset;
    use crate::predict::PredictedLabel;
    use chrono::NaiveDate;

    fn session() -> Session {
        let anchor = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        Session::new(
            synthesize_dataset(42, anchor),
            RiskPolicy::default(),
            TrainerConfig::default(),
        )
    }

    #[test]
    fn predict_before_training_is_unknown() {
        let session = session();
        let input = LiveConditions {
            temperature_c: 25.0,
            humidity_pct: 60.0,
            wind_speed_kmh: 15.0,
            rainfall_mm: 2.0,
        };
        let prediction = session.predict(&input);
        assert_eq!(prediction.label, PredictedLabel::Unknown);
        assert_eq!(prediction.confidence, 0.0);
    }

    #[test]
    fn retrain_installs_bundle_only_when_trained() {
        let mut session = session();
        let outcome = session.retrain().unwrap();
        assert_eq!(session.model().is_some(), outcome.bundle().is_some());
    }

    #[test]
    fn derive_has_one_row_per_weather_date() {
        let session = session();
        assert_eq!(session.derive().len(), session.dataset().weather.len());
    }
}
