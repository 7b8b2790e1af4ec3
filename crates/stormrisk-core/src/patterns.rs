//! Post-hoc risk patterns: how often extreme-feature days end up labeled
//! Danger. Display-only; nothing downstream consumes these.

use serde::Serialize;

use crate::features::{FeatureTable, RiskLevel, RiskPolicy};

/// One observation about an extreme-feature subset of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternObservation {
    /// Indicator the subset is filtered on.
    pub indicator: &'static str,
    /// Rows matching the indicator.
    pub matching_rows: usize,
    /// Fraction of matching rows labeled Danger, in [0, 1].
    pub danger_share: f64,
    /// Human-readable summary for display.
    pub summary: String,
}

/// Correlate each extreme-feature subset with Danger frequency. Subsets with
/// no matching rows are omitted.
pub fn analyze_patterns(table: &FeatureTable, policy: &RiskPolicy) -> Vec<PatternObservation> {
    let subsets: [(&'static str, Box<dyn Fn(&crate::features::FeatureRow) -> bool>, String); 4] = [
        (
            "temp_extreme",
            Box::new(|r| r.temp_extreme),
            format!("extreme temperatures (>{:.0}°C or <{:.0}°C)", policy.hot_temp_c, policy.cold_temp_c),
        ),
        (
            "high_wind",
            Box::new(|r| r.high_wind),
            format!("high winds (>{:.0} km/h)", policy.high_wind_kmh),
        ),
        (
            "heavy_rain",
            Box::new(|r| r.heavy_rain),
            format!("heavy rainfall (>{:.0} mm)", policy.heavy_rain_mm),
        ),
        (
            "low_pressure",
            Box::new(|r| r.low_pressure),
            format!("low pressure (<{:.0} hPa)", policy.low_pressure_hpa),
        ),
    ];

    subsets
        .into_iter()
        .filter_map(|(indicator, matches, description)| {
            let matching: Vec<_> = table.rows.iter().filter(|r| matches(r)).collect();
            if matching.is_empty() {
                return None;
            }
            let dangerous = matching
                .iter()
                .filter(|r| r.risk_level == RiskLevel::Danger)
                .count();
            let danger_share = dangerous as f64 / matching.len() as f64;
            let summary = format!(
                "Days with {description}: {:.1}% classified Danger ({dangerous} of {})",
                danger_share * 100.0,
                matching.len(),
            );
            Some(PatternObservation {
                indicator,
                matching_rows: matching.len(),
                danger_share,
                summary,
            })
        })
        .collect()
}
