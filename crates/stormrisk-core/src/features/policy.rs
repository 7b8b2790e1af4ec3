//! Risk policy: indicator thresholds, score weights, and label cut points.
//!
//! The thresholds and cut points are calibration, not derived quantities,
//! so they live in a config struct rather than being baked into the deriver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk label: Safe < Warning < Danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Safe, RiskLevel::Warning, RiskLevel::Danger];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Warning => "Warning",
            RiskLevel::Danger => "Danger",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds and cut points for feature derivation.
///
/// Score weights are fixed policy: critical_count×3 + disaster_count×1 +
/// temp_extreme×2 + high_wind×2 + heavy_rain×2. The low-pressure indicator
/// is a feature but carries no score weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Temperature above this (°C) is extreme.
    pub hot_temp_c: f64,
    /// Temperature below this (°C) is extreme.
    pub cold_temp_c: f64,
    /// Wind speed above this (km/h) counts as high wind.
    pub high_wind_kmh: f64,
    /// Rainfall above this (mm) counts as heavy rain.
    pub heavy_rain_mm: f64,
    /// Pressure below this (hPa) counts as low pressure.
    pub low_pressure_hpa: f64,
    /// risk_score ≤ this → Safe.
    pub safe_max_score: f64,
    /// safe_max_score < risk_score ≤ this → Warning; above → Danger.
    pub warning_max_score: f64,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            hot_temp_c: 35.0,
            cold_temp_c: 5.0,
            high_wind_kmh: 30.0,
            heavy_rain_mm: 10.0,
            low_pressure_hpa: 1000.0,
            safe_max_score: 2.0,
            warning_max_score: 5.0,
        }
    }
}

impl RiskPolicy {
    pub fn is_temp_extreme(&self, temperature_c: f64) -> bool {
        temperature_c > self.hot_temp_c || temperature_c < self.cold_temp_c
    }

    pub fn is_high_wind(&self, wind_speed_kmh: f64) -> bool {
        wind_speed_kmh > self.high_wind_kmh
    }

    pub fn is_heavy_rain(&self, rainfall_mm: f64) -> bool {
        rainfall_mm > self.heavy_rain_mm
    }

    pub fn is_low_pressure(&self, pressure_hpa: f64) -> bool {
        pressure_hpa < self.low_pressure_hpa
    }

    /// Bucket a risk score into its ordinal label.
    pub fn classify(&self, risk_score: f64) -> RiskLevel {
        if risk_score <= self.safe_max_score {
            RiskLevel::Safe
        } else if risk_score <= self.warning_max_score {
            RiskLevel::Warning
        } else {
            RiskLevel::Danger
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_cut_points() {
        let p = RiskPolicy::default();
        assert_eq!(p.classify(0.0), RiskLevel::Safe);
        assert_eq!(p.classify(2.0), RiskLevel::Safe);
        assert_eq!(p.classify(3.0), RiskLevel::Warning);
        assert_eq!(p.classify(5.0), RiskLevel::Warning);
        assert_eq!(p.classify(6.0), RiskLevel::Danger);
    }

    /// Increasing risk_score never decreases risk_level.
    #[test]
    fn classify_is_monotonic() {
        let p = RiskPolicy::default();
        let mut prev = RiskLevel::Safe;
        for tenths in 0..=100 {
            let level = p.classify(f64::from(tenths) / 10.0);
            assert!(level >= prev, "level decreased at score {}", tenths as f64 / 10.0);
            prev = level;
        }
    }

    #[test]
    fn indicator_thresholds_are_strict() {
        let p = RiskPolicy::default();
        assert!(!p.is_temp_extreme(35.0));
        assert!(p.is_temp_extreme(35.1));
        assert!(p.is_temp_extreme(4.9));
        assert!(!p.is_high_wind(30.0));
        assert!(p.is_high_wind(30.1));
        assert!(!p.is_heavy_rain(10.0));
        assert!(p.is_heavy_rain(10.1));
        assert!(!p.is_low_pressure(1000.0));
        assert!(p.is_low_pressure(999.9));
    }
}
