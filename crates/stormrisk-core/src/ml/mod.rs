//! Classifier stack: label encoding, standardization, stratified splitting,
//! the CART/forest ensemble, and the training pipeline over them.

mod encoder;
mod forest;
mod scaler;
mod split;
mod tree;
mod trainer;

pub use encoder::LabelCodec;
pub use forest::{ForestParams, ForestPrediction, RandomForest};
pub use scaler::StandardScaler;
pub use split::{stratified_split, StratifiedSplit, StratifyFailure};
pub use tree::{DecisionTree, TreeParams};
pub use trainer::{
    train, ClassifierStrategy, DegradeReason, ModelBundle, TrainOutcome, TrainerConfig,
    MIN_TRAINING_ROWS,
};
