//! Feature derivation: join weather with daily disaster aggregates, compute
//! indicator features, the composite risk score, and the ordinal label.
//!
//! The join is a left join on the weather table: exactly one feature row per
//! distinct weather date, never a fabricated date, and dates with no events
//! zero-fill the aggregate fields. Rows with non-finite values are dropped so
//! the training set contains no missing data.

use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::{aggregate_daily, DailyAggregate};
use super::policy::{RiskLevel, RiskPolicy};
use crate::data::{DisasterEvent, WeatherRecord};

/// Training feature columns, in vector order. The daily aggregates feed the
/// score but are not themselves classifier inputs.
pub const FEATURE_NAMES: [&str; 9] = [
    "temperature",
    "humidity",
    "wind_speed",
    "rainfall",
    "pressure",
    "temp_extreme",
    "high_wind",
    "heavy_rain",
    "low_pressure",
];

/// Number of classifier input features.
pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// One labeled row of the derived feature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub rainfall_mm: f64,
    pub pressure_hpa: f64,
    pub total_affected: u64,
    pub critical_count: u32,
    pub disaster_count: u32,
    pub temp_extreme: bool,
    pub high_wind: bool,
    pub heavy_rain: bool,
    pub low_pressure: bool,
    /// Weighted composite: critical×3 + disasters×1 + each weather indicator×2.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

impl FeatureRow {
    /// Classifier input vector, columns in `FEATURE_NAMES` order.
    /// Booleans encode as 0.0 / 1.0.
    pub fn feature_vector(&self) -> Vec<f64> {
        vec![
            self.temperature_c,
            self.humidity_pct,
            self.wind_speed_kmh,
            self.rainfall_mm,
            self.pressure_hpa,
            flag(self.temp_extreme),
            flag(self.high_wind),
            flag(self.heavy_rain),
            flag(self.low_pressure),
        ]
    }
}

/// The labeled feature table: output of derivation, input to the trainer and
/// the pattern analyzer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count of rows per risk level, in `RiskLevel::ALL` order.
    pub fn label_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for row in &self.rows {
            counts[row.risk_level as usize] += 1;
        }
        counts
    }
}

/// Derive the labeled feature table from the two input tables.
///
/// An empty weather table yields an empty feature table; the trainer treats
/// that as insufficient data rather than this function erroring.
pub fn derive_features(
    weather: &[WeatherRecord],
    disasters: &[DisasterEvent],
    policy: &RiskPolicy,
) -> FeatureTable {
    let by_day = aggregate_daily(disasters);

    let rows: Vec<FeatureRow> = weather
        .iter()
        .filter(|w| is_finite_record(w))
        .map(|w| {
            let agg = by_day.get(&w.date).copied().unwrap_or(DailyAggregate::default());
            derive_row(w, agg, policy)
        })
        .collect();

    tracing::debug!(
        weather_rows = weather.len(),
        events = disasters.len(),
        feature_rows = rows.len(),
        "derived feature table"
    );
    FeatureTable { rows }
}

fn derive_row(w: &WeatherRecord, agg: DailyAggregate, policy: &RiskPolicy) -> FeatureRow {
    let temp_extreme = policy.is_temp_extreme(w.temperature_c);
    let high_wind = policy.is_high_wind(w.wind_speed_kmh);
    let heavy_rain = policy.is_heavy_rain(w.rainfall_mm);
    let low_pressure = policy.is_low_pressure(w.pressure_hpa);

    let risk_score = f64::from(agg.critical_count) * 3.0
        + f64::from(agg.disaster_count)
        + flag(temp_extreme) * 2.0
        + flag(high_wind) * 2.0
        + flag(heavy_rain) * 2.0;

    FeatureRow {
        date: w.date,
        temperature_c: w.temperature_c,
        humidity_pct: w.humidity_pct,
        wind_speed_kmh: w.wind_speed_kmh,
        rainfall_mm: w.rainfall_mm,
        pressure_hpa: w.pressure_hpa,
        total_affected: agg.total_affected,
        critical_count: agg.critical_count,
        disaster_count: agg.disaster_count,
        temp_extreme,
        high_wind,
        heavy_rain,
        low_pressure,
        risk_score,
        risk_level: policy.classify(risk_score),
    }
}

/// Boolean indicator as a 0.0/1.0 feature value.
fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn is_finite_record(w: &WeatherRecord) -> bool {
    w.temperature_c.is_finite()
        && w.humidity_pct.is_finite()
        && w.wind_speed_kmh.is_finite()
        && w.rainfall_mm.is_finite()
        && w.pressure_hpa.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DisasterKind, Severity};
    use chrono::{DateTime, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn weather(d: u32, temp: f64, humidity: f64, wind: f64, rain: f64, pressure: f64) -> WeatherRecord {
        WeatherRecord {
            date: day(d),
            temperature_c: temp,
            humidity_pct: humidity,
            wind_speed_kmh: wind,
            rainfall_mm: rain,
            pressure_hpa: pressure,
        }
    }

    fn calm(d: u32) -> WeatherRecord {
        weather(d, 24.0, 55.0, 12.0, 2.0, 1013.0)
    }

    fn event_on(d: u32, severity: Severity, affected: u32) -> DisasterEvent {
        DisasterEvent {
            id: d,
            kind: DisasterKind::Cyclone,
            severity,
            latitude: 10.0,
            longitude: 20.0,
            location: "test".into(),
            timestamp: DateTime::parse_from_rfc3339(&format!("2024-03-{d:02}T06:00:00Z"))
                .unwrap()
                .with_timezone(&Utc),
            affected_population: affected,
            magnitude: 2.0,
        }
    }

    /// One output row per weather date, whatever the disaster table holds.
    #[test]
    fn one_row_per_weather_date() {
        let weather: Vec<WeatherRecord> = (1..=9).map(calm).collect();
        let policy = RiskPolicy::default();

        let no_events = derive_features(&weather, &[], &policy);
        assert_eq!(no_events.len(), 9);

        let events = vec![
            event_on(3, Severity::Low, 100),
            event_on(3, Severity::Critical, 5_000),
            // Event on a date absent from the weather table: must not add a row.
            event_on(25, Severity::Critical, 9_000),
        ];
        let with_events = derive_features(&weather, &events, &policy);
        assert_eq!(with_events.len(), 9);
        assert!(with_events.rows.iter().all(|r| r.date != day(25)));
    }

    /// Zero-fill invariant: no events on a date means all-zero aggregates.
    #[test]
    fn missing_dates_zero_fill() {
        let weather = vec![calm(1), calm(2)];
        let events = vec![event_on(1, Severity::Critical, 300)];
        let table = derive_features(&weather, &events, &RiskPolicy::default());

        let hit = &table.rows[0];
        assert_eq!(hit.disaster_count, 1);
        assert_eq!(hit.critical_count, 1);
        assert_eq!(hit.total_affected, 300);

        let miss = &table.rows[1];
        assert_eq!(miss.disaster_count, 0);
        assert_eq!(miss.critical_count, 0);
        assert_eq!(miss.total_affected, 0);
    }

    #[test]
    fn empty_weather_empty_table() {
        let table = derive_features(&[], &[event_on(1, Severity::Low, 10)], &RiskPolicy::default());
        assert!(table.is_empty());
    }

    /// Severe-weather scenario: all four indicators fire, score 6, Danger.
    #[test]
    fn severe_weather_scores_danger() {
        let weather = vec![weather(1, 42.0, 85.0, 65.0, 25.0, 985.0)];
        let table = derive_features(&weather, &[], &RiskPolicy::default());
        let row = &table.rows[0];
        assert!(row.temp_extreme);
        assert!(row.high_wind);
        assert!(row.heavy_rain);
        assert!(row.low_pressure);
        assert_eq!(row.risk_score, 6.0);
        assert_eq!(row.risk_level, RiskLevel::Danger);
    }

    /// Calm-weather scenario: no indicators, score 0, Safe.
    #[test]
    fn calm_weather_scores_safe() {
        let table = derive_features(&[calm(1)], &[], &RiskPolicy::default());
        let row = &table.rows[0];
        assert!(!row.temp_extreme && !row.high_wind && !row.heavy_rain && !row.low_pressure);
        assert_eq!(row.risk_score, 0.0);
        assert_eq!(row.risk_level, RiskLevel::Safe);
    }

    /// Critical events weigh 3 + 1 each into the score.
    #[test]
    fn critical_events_raise_score() {
        let weather = vec![calm(1)];
        let events = vec![
            event_on(1, Severity::Critical, 100),
            event_on(1, Severity::Low, 100),
        ];
        let table = derive_features(&weather, &events, &RiskPolicy::default());
        // 1 critical × 3 + 2 events × 1 = 5 → Warning.
        assert_eq!(table.rows[0].risk_score, 5.0);
        assert_eq!(table.rows[0].risk_level, RiskLevel::Warning);
    }

    #[test]
    fn non_finite_rows_are_dropped() {
        let mut bad = calm(1);
        bad.rainfall_mm = f64::NAN;
        let table = derive_features(&[bad, calm(2)], &[], &RiskPolicy::default());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].date, day(2));
    }

    #[test]
    fn feature_vector_matches_names() {
        let table = derive_features(&[weather(1, 42.0, 85.0, 65.0, 25.0, 985.0)], &[], &RiskPolicy::default());
        let v = table.rows[0].feature_vector();
        assert_eq!(v.len(), N_FEATURES);
        assert_eq!(v[0], 42.0);
        assert_eq!(v[4], 985.0);
        // All four indicators encoded as 1.0.
        assert_eq!(&v[5..], &[1.0, 1.0, 1.0, 1.0]);
    }
}
