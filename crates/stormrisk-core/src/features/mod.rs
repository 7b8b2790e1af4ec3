//! Feature derivation: daily aggregation, indicator features, risk scoring
//! and labeling.

mod aggregate;
mod derive;
mod policy;

pub use aggregate::{aggregate_daily, DailyAggregate};
pub use derive::{derive_features, FeatureRow, FeatureTable, FEATURE_NAMES, N_FEATURES};
pub use policy::{RiskLevel, RiskPolicy};
