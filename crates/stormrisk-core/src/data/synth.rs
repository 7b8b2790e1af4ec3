//! Seeded synthetic dataset generator.
//!
//! Stands in for the live weather/earthquake fetchers: produces a
//! 31-day weather table and 50 disaster events over 8 world locations,
//! fully deterministic for a given (seed, anchor date) pair. Datasets
//! from here always carry `Provenance::Fallback` so consumers can tell
//! synthetic input from live input.

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use super::records::{DisasterEvent, DisasterKind, Severity, WeatherRecord};
use super::{Dataset, Provenance};

/// Days of weather history generated, anchor day included.
const WEATHER_DAYS: i64 = 31;
/// Number of disaster events generated.
const N_EVENTS: u32 = 50;
/// Events are scattered over the trailing window of this many hours.
const EVENT_WINDOW_HOURS: i64 = 72;

/// Reference locations the event generator scatters around.
const LOCATIONS: [(&str, f64, f64); 8] = [
    ("California, USA", 36.7783, -119.4179),
    ("Tokyo, Japan", 35.6762, 139.6503),
    ("Mumbai, India", 19.0760, 72.8777),
    ("Sydney, Australia", -33.8688, 151.2093),
    ("London, UK", 51.5074, -0.1278),
    ("São Paulo, Brazil", -23.5505, -46.6333),
    ("Cairo, Egypt", 30.0444, 31.2357),
    ("Jakarta, Indonesia", -6.2088, 106.8456),
];

/// Generate a full synthetic dataset ending on `anchor`.
pub fn synthesize_dataset(seed: u64, anchor: NaiveDate) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x57EA_7F00_D5A1_1E0B);
    let weather = synth_weather(&mut rng, anchor);
    let disasters = synth_disasters(&mut rng, anchor);
    tracing::debug!(
        weather_rows = weather.len(),
        events = disasters.len(),
        %anchor,
        "synthesized fallback dataset"
    );
    Dataset {
        weather,
        disasters,
        provenance: Provenance::Fallback,
    }
}

/// One weather record per day for the `WEATHER_DAYS` days ending on `anchor`.
fn synth_weather(rng: &mut StdRng, anchor: NaiveDate) -> Vec<WeatherRecord> {
    let temperature = Normal::new(25.0, 10.0).expect("finite parameters");
    let pressure = Normal::new(1013.0, 20.0).expect("finite parameters");
    // Exponential with mean 2 mm/day.
    let rainfall = Exp::new(0.5).expect("positive rate");

    (0..WEATHER_DAYS)
        .map(|offset| WeatherRecord {
            date: anchor - Duration::days(WEATHER_DAYS - 1 - offset),
            temperature_c: temperature.sample(rng),
            humidity_pct: rng.gen_range(30.0..90.0),
            wind_speed_kmh: rng.gen_range(5.0..50.0),
            rainfall_mm: rainfall.sample(rng),
            pressure_hpa: pressure.sample(rng),
        })
        .collect()
}

/// `N_EVENTS` events with jittered coordinates in the trailing 72 h window.
fn synth_disasters(rng: &mut StdRng, anchor: NaiveDate) -> Vec<DisasterEvent> {
    let jitter = Normal::new(0.0, 2.0).expect("finite parameters");
    // Reference "now": noon UTC on the anchor day, so events land on the
    // anchor date and the couple of days before it.
    let now = anchor.and_time(NaiveTime::MIN).and_utc() + Duration::hours(12);

    (0..N_EVENTS)
        .map(|id| {
            let (name, lat, lon) = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
            let kind = DisasterKind::ALL[rng.gen_range(0..DisasterKind::ALL.len())];
            let severity = weighted_severity(rng);
            let magnitude = if kind == DisasterKind::Earthquake {
                rng.gen_range(1.0..9.0)
            } else {
                rng.gen_range(1.0..5.0)
            };
            DisasterEvent {
                id,
                kind,
                severity,
                latitude: (lat + jitter.sample(rng)).clamp(-90.0, 90.0),
                longitude: (lon + jitter.sample(rng)).clamp(-180.0, 180.0),
                location: name.to_string(),
                timestamp: now
                    - Duration::hours(rng.gen_range(0..EVENT_WINDOW_HOURS))
                    - Duration::minutes(rng.gen_range(0..60)),
                affected_population: rng.gen_range(100..50_000),
                magnitude,
            }
        })
        .collect()
}

/// Severity drawn with weights 0.4 / 0.3 / 0.2 / 0.1 (Low → Critical).
fn weighted_severity(rng: &mut StdRng) -> Severity {
    let r: f64 = rng.gen();
    if r < 0.4 {
        Severity::Low
    } else if r < 0.7 {
        Severity::Medium
    } else if r < 0.9 {
        Severity::High
    } else {
        Severity::Critical
    }
}
