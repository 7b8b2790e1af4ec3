//! Input data model and synthetic data generation.

mod records;
mod synth;

pub use records::{DisasterEvent, DisasterKind, Severity, WeatherRecord};
pub use synth::synthesize_dataset;

use serde::{Deserialize, Serialize};

/// Where a loaded dataset came from. Live fetchers tag their output `Live`;
/// anything substituted on fetch failure (or generated outright) is
/// `Fallback`, so downstream consumers can decide how much to trust it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Fetched from a real upstream source.
    Live,
    /// Synthesized or substituted mock data.
    Fallback,
}

/// The pair of input tables the pipeline runs on, with their provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub weather: Vec<WeatherRecord>,
    pub disasters: Vec<DisasterEvent>,
    pub provenance: Provenance,
}
