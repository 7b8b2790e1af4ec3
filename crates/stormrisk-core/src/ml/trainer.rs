//! Training pipeline: encode labels, split, scale, fit the ensemble, report
//! held-out accuracy and feature importance.
//!
//! The pipeline is one-shot: every training invocation rebuilds all fitted
//! artifacts from the feature table. Stratification failures degrade the
//! outcome instead of erroring; only an unusably small table is an `Error`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::encoder::LabelCodec;
use super::forest::{ForestParams, RandomForest};
use super::scaler::StandardScaler;
use super::split::stratified_split;
use crate::error::{Error, Result};
use crate::features::{FeatureTable, RiskLevel, FEATURE_NAMES};

/// Fewest feature rows the trainer will accept.
pub const MIN_TRAINING_ROWS: usize = 2;

/// Supported classifier strategies, each with its hyperparameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierStrategy {
    /// Bagged ensemble of gini CART trees.
    RandomForest {
        n_trees: usize,
        max_depth: Option<usize>,
        min_samples_split: usize,
    },
}

impl Default for ClassifierStrategy {
    fn default() -> Self {
        Self::RandomForest {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

/// Trainer configuration. Defaults reproduce the reference run: 80/20
/// stratified split, seed 42, 100-tree forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub strategy: ClassifierStrategy,
    /// Fraction of each class held out for testing.
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            strategy: ClassifierStrategy::default(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Why training degraded instead of producing a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DegradeReason {
    #[error("training table contains a single risk level; stratified split needs at least two")]
    SingleClass,
    #[error("risk level {level} has only {count} example(s); stratified split needs at least 2 per class")]
    ClassTooSmall { level: RiskLevel, count: usize },
}

/// Everything a training run fits, owned by the session that trained it.
/// Discarded wholesale when a new run replaces it; nothing persists.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub forest: RandomForest,
    pub scaler: StandardScaler,
    pub labels: LabelCodec,
    /// `(feature name, normalized weight)` per input feature; weights sum
    /// to 1 regardless of test-set composition.
    pub feature_importance: Vec<(String, f64)>,
    /// Exact-match fraction on the held-out test rows.
    pub accuracy: f64,
    /// Held-out recall per class present in the test set.
    pub class_recall: Vec<(RiskLevel, f64)>,
    pub n_train: usize,
    pub n_test: usize,
}

/// Result of a training request: a fitted bundle, or a degraded report.
#[derive(Debug, Clone)]
pub enum TrainOutcome {
    Trained(ModelBundle),
    Degraded { reason: DegradeReason },
}

impl TrainOutcome {
    /// Held-out accuracy; 0.0 for degraded outcomes.
    pub fn accuracy(&self) -> f64 {
        match self {
            TrainOutcome::Trained(bundle) => bundle.accuracy,
            TrainOutcome::Degraded { .. } => 0.0,
        }
    }

    /// Importance mapping; empty for degraded outcomes.
    pub fn feature_importance(&self) -> &[(String, f64)] {
        match self {
            TrainOutcome::Trained(bundle) => &bundle.feature_importance,
            TrainOutcome::Degraded { .. } => &[],
        }
    }

    pub fn bundle(&self) -> Option<&ModelBundle> {
        match self {
            TrainOutcome::Trained(bundle) => Some(bundle),
            TrainOutcome::Degraded { .. } => None,
        }
    }
}

/// Train the risk classifier on a labeled feature table.
///
/// # Errors
///
/// `Error::InsufficientData` if the table has fewer than
/// [`MIN_TRAINING_ROWS`] rows. All other failure modes degrade.
pub fn train(table: &FeatureTable, config: &TrainerConfig) -> Result<TrainOutcome> {
    if table.len() < MIN_TRAINING_ROWS {
        return Err(Error::InsufficientData {
            rows: table.len(),
            min: MIN_TRAINING_ROWS,
        });
    }

    let x: Vec<Vec<f64>> = table.rows.iter().map(|r| r.feature_vector()).collect();
    let labels: Vec<RiskLevel> = table.rows.iter().map(|r| r.risk_level).collect();

    let codec = LabelCodec::fit(labels.iter().copied());
    if codec.n_classes() < 2 {
        tracing::warn!("training degraded: single risk level in table");
        return Ok(TrainOutcome::Degraded {
            reason: DegradeReason::SingleClass,
        });
    }
    let y: Vec<usize> = labels
        .iter()
        .filter_map(|&l| codec.encode(l))
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let split = match stratified_split(&y, codec.n_classes(), config.test_fraction, &mut rng) {
        Ok(split) => split,
        Err(failure) => {
            let level = codec.decode(failure.class).unwrap_or(RiskLevel::Safe);
            tracing::warn!(%level, count = failure.count, "training degraded: class too small to stratify");
            return Ok(TrainOutcome::Degraded {
                reason: DegradeReason::ClassTooSmall {
                    level,
                    count: failure.count,
                },
            });
        }
    };

    // Scaler is fit on training rows only, then applied unchanged everywhere.
    let train_raw: Vec<Vec<f64>> = split.train.iter().map(|&i| x[i].clone()).collect();
    let scaler = StandardScaler::fit(&train_raw);
    let train_x = scaler.transform_batch(&train_raw);
    let train_y: Vec<usize> = split.train.iter().map(|&i| y[i]).collect();

    let ClassifierStrategy::RandomForest {
        n_trees,
        max_depth,
        min_samples_split,
    } = config.strategy;
    let params = ForestParams {
        n_trees,
        max_depth,
        min_samples_split,
    };
    let forest = RandomForest::fit(&train_x, &train_y, codec.n_classes(), &params, config.seed);

    let (accuracy, class_recall) = evaluate(&forest, &scaler, &x, &y, &split.test, &codec);

    let feature_importance: Vec<(String, f64)> = FEATURE_NAMES
        .iter()
        .zip(forest.feature_importance())
        .map(|(name, &weight)| (name.to_string(), weight))
        .collect();

    tracing::info!(
        n_train = split.train.len(),
        n_test = split.test.len(),
        accuracy,
        "trained risk classifier"
    );

    Ok(TrainOutcome::Trained(ModelBundle {
        forest,
        scaler,
        labels: codec,
        feature_importance,
        accuracy,
        class_recall,
        n_train: split.train.len(),
        n_test: split.test.len(),
    }))
}

/// Held-out accuracy and per-class recall on the test indices.
fn evaluate(
    forest: &RandomForest,
    scaler: &StandardScaler,
    x: &[Vec<f64>],
    y: &[usize],
    test: &[usize],
    codec: &LabelCodec,
) -> (f64, Vec<(RiskLevel, f64)>) {
    let mut correct = 0usize;
    let mut per_class_total = vec![0usize; codec.n_classes()];
    let mut per_class_correct = vec![0usize; codec.n_classes()];

    for &i in test {
        let predicted = forest.predict(&scaler.transform(&x[i]));
        per_class_total[y[i]] += 1;
        if predicted == y[i] {
            correct += 1;
            per_class_correct[y[i]] += 1;
        }
    }

    let accuracy = if test.is_empty() {
        0.0
    } else {
        correct as f64 / test.len() as f64
    };

    let class_recall = per_class_total
        .iter()
        .enumerate()
        .filter(|(_, &total)| total > 0)
        .filter_map(|(class, &total)| {
            codec
                .decode(class)
                .map(|level| (level, per_class_correct[class] as f64 / total as f64))
        })
        .collect();

    (accuracy, class_recall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WeatherRecord;
    use crate::features::{derive_features, RiskPolicy};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn weather(day_index: u32, temp: f64, wind: f64, rain: f64) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i64::from(day_index)),
            temperature_c: temp,
            humidity_pct: 55.0 + f64::from(day_index % 7),
            wind_speed_kmh: wind,
            rainfall_mm: rain,
            pressure_hpa: 1013.0,
        }
    }

    /// 10 Safe, 10 Warning, 10 Danger rows, cleanly separated.
    fn balanced_table() -> FeatureTable {
        let mut records = Vec::new();
        for i in 0..10 {
            let j = f64::from(i) * 0.3;
            // Safe: no indicators.
            records.push(weather(i, 20.0 + j, 10.0 + j, 1.0));
            // Warning: temp_extreme + high_wind → score 4.
            records.push(weather(30 + i, 40.0 + j, 60.0 + j, 1.0));
            // Danger: add heavy rain → score 6.
            records.push(weather(60 + i, 40.0 + j, 60.0 + j, 20.0 + j));
        }
        derive_features(&records, &[], &RiskPolicy::default())
    }

    /// All-calm table: one label class only.
    fn single_class_table() -> FeatureTable {
        let records: Vec<WeatherRecord> = (0..12).map(|i| weather(i, 22.0, 10.0, 1.0)).collect();
        derive_features(&records, &[], &RiskPolicy::default())
    }

    #[test]
    fn trains_on_balanced_table() {
        let table = balanced_table();
        assert_eq!(table.label_counts(), [10, 10, 10]);

        let outcome = train(&table, &TrainerConfig::default()).unwrap();
        let bundle = outcome.bundle().expect("trained");
        assert_eq!(bundle.n_train + bundle.n_test, 30);
        assert_eq!(bundle.n_test, 6); // 2 held out per class
        // Cleanly separable clusters: the forest should nail the test rows.
        assert!(bundle.accuracy > 0.9, "accuracy {}", bundle.accuracy);
    }

    #[test]
    fn importance_has_one_entry_per_feature_summing_to_one() {
        let outcome = train(&balanced_table(), &TrainerConfig::default()).unwrap();
        let importance = outcome.feature_importance();
        assert_eq!(importance.len(), FEATURE_NAMES.len());
        let total: f64 = importance.iter().map(|(_, w)| w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-6);
        for ((name, weight), expected) in importance.iter().zip(FEATURE_NAMES) {
            assert_eq!(name, expected);
            assert!(*weight >= 0.0);
        }
    }

    #[test]
    fn training_is_reproducible_for_a_seed() {
        let table = balanced_table();
        let config = TrainerConfig::default();
        let a = train(&table, &config).unwrap();
        let b = train(&table, &config).unwrap();
        assert_eq!(a.accuracy(), b.accuracy());
        assert_eq!(a.feature_importance(), b.feature_importance());
    }

    /// Single label class → degraded outcome, never a panic or error.
    #[test]
    fn single_class_degrades() {
        let outcome = train(&single_class_table(), &TrainerConfig::default()).unwrap();
        match &outcome {
            TrainOutcome::Degraded { reason } => assert_eq!(*reason, DegradeReason::SingleClass),
            TrainOutcome::Trained(_) => panic!("expected degraded outcome"),
        }
        assert_eq!(outcome.accuracy(), 0.0);
        assert!(outcome.feature_importance().is_empty());
    }

    /// A class with one example fails stratification, degrading the outcome.
    #[test]
    fn lone_class_example_degrades() {
        let mut records: Vec<WeatherRecord> = (0..8).map(|i| weather(i, 22.0, 10.0, 1.0)).collect();
        records.push(weather(20, 40.0, 60.0, 20.0)); // one Danger row
        let table = derive_features(&records, &[], &RiskPolicy::default());

        let outcome = train(&table, &TrainerConfig::default()).unwrap();
        match outcome {
            TrainOutcome::Degraded {
                reason: DegradeReason::ClassTooSmall { level, count },
            } => {
                assert_eq!(level, RiskLevel::Danger);
                assert_eq!(count, 1);
            }
            other => panic!("expected class-too-small degradation, got {other:?}"),
        }
    }

    #[test]
    fn empty_table_is_insufficient_data() {
        let err = train(&FeatureTable::default(), &TrainerConfig::default()).unwrap_err();
        assert_eq!(err, Error::InsufficientData { rows: 0, min: MIN_TRAINING_ROWS });
    }

    #[test]
    fn class_recall_covers_test_classes() {
        let outcome = train(&balanced_table(), &TrainerConfig::default()).unwrap();
        let bundle = outcome.bundle().unwrap();
        // Two test rows per class → all three classes appear.
        assert_eq!(bundle.class_recall.len(), 3);
        for (_, recall) in &bundle.class_recall {
            assert!((0.0..=1.0).contains(recall));
        }
    }
}
