//! Raw input records: daily weather observations and disaster events.
//!
//! These are the two tables the pipeline consumes. They are supplied
//! in-memory by a data-loading collaborator (the synthesizer in this crate,
//! or a live fetcher outside it) and are immutable once produced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One weather observation per calendar day. `date` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    /// Air temperature in °C.
    pub temperature_c: f64,
    /// Relative humidity, 0–100 %.
    pub humidity_pct: f64,
    /// Wind speed in km/h, ≥ 0.
    pub wind_speed_kmh: f64,
    /// Rainfall in mm, ≥ 0.
    pub rainfall_mm: f64,
    /// Barometric pressure in hPa.
    pub pressure_hpa: f64,
}

/// Kind of disaster event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisasterKind {
    Earthquake,
    Flood,
    Cyclone,
    Wildfire,
    Drought,
    Landslide,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 6] = [
        DisasterKind::Earthquake,
        DisasterKind::Flood,
        DisasterKind::Cyclone,
        DisasterKind::Wildfire,
        DisasterKind::Drought,
        DisasterKind::Landslide,
    ];
}

impl fmt::Display for DisasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisasterKind::Earthquake => "Earthquake",
            DisasterKind::Flood => "Flood",
            DisasterKind::Cyclone => "Cyclone",
            DisasterKind::Wildfire => "Wildfire",
            DisasterKind::Drought => "Drought",
            DisasterKind::Landslide => "Landslide",
        };
        f.write_str(name)
    }
}

/// Ordinal event severity: Low < Medium < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// A single disaster event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterEvent {
    pub id: u32,
    pub kind: DisasterKind,
    pub severity: Severity,
    /// Geodetic latitude, –90 to +90.
    pub latitude: f64,
    /// Longitude, –180 to +180.
    pub longitude: f64,
    /// Human-readable location name.
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub affected_population: u32,
    /// Positive; semantically meaningful only for `Earthquake`.
    pub magnitude: f64,
}

impl DisasterEvent {
    /// Calendar day the event occurred on (UTC), used for the daily join.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}
