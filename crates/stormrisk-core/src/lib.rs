//! stormrisk-core — risk scoring and classification for disaster/weather
//! analytics.
//!
//! A linear one-shot pipeline over two in-memory tables:
//!
//! 1. [`features::derive_features`] left-joins daily disaster aggregates onto
//!    the weather table, computes indicator features, a weighted risk score,
//!    and an ordinal Safe/Warning/Danger label.
//! 2. [`ml::train`] encodes labels, fits a scaler on the training split only,
//!    trains a seeded bagged CART ensemble, and reports held-out accuracy
//!    plus normalized feature importance.
//! 3. [`predict::predict`] applies the fitted artifacts to a live what-if
//!    input, degrading to `Unknown` rather than erroring.
//! 4. [`patterns::analyze_patterns`] produces display-only descriptive
//!    statistics over the labeled table.
//!
//! [`session::Session`] carries the tables, policy, and fitted bundle
//! explicitly through those calls. [`data::synthesize_dataset`] provides a
//! seeded fallback dataset in place of live fetchers.

pub mod data;
pub mod error;
pub mod features;
pub mod ml;
pub mod patterns;
pub mod predict;
pub mod session;

pub use data::{synthesize_dataset, Dataset, DisasterEvent, DisasterKind, Provenance, Severity, WeatherRecord};
pub use error::{Error, Result};
pub use features::{derive_features, FeatureRow, FeatureTable, RiskLevel, RiskPolicy, FEATURE_NAMES};
pub use ml::{train, ClassifierStrategy, DegradeReason, ModelBundle, TrainOutcome, TrainerConfig};
pub use patterns::{analyze_patterns, PatternObservation};
pub use predict::{predict, LiveConditions, PredictedLabel, Prediction};
pub use session::Session;
