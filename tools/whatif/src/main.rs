//! What-if prediction tool: train on a synthetic dataset, then classify a
//! single hand-entered weather scenario.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stormrisk_core::{
    synthesize_dataset, LiveConditions, RiskPolicy, Session, TrainOutcome, TrainerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "whatif", about = "Classify a what-if weather scenario with a freshly trained model")]
struct Args {
    /// Air temperature in °C.
    #[arg(long, default_value_t = 25.0)]
    temperature: f64,

    /// Relative humidity in %.
    #[arg(long, default_value_t = 60.0)]
    humidity: f64,

    /// Wind speed in km/h.
    #[arg(long, default_value_t = 15.0)]
    wind: f64,

    /// Rainfall in mm.
    #[arg(long, default_value_t = 2.0)]
    rainfall: f64,

    /// Seed for the synthetic dataset and the trainer.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whatif=info,stormrisk_core=warn".into()),
        )
        .init();

    let args = Args::parse();
    let dataset = synthesize_dataset(args.seed, Utc::now().date_naive());
    let trainer = TrainerConfig {
        seed: args.seed,
        ..TrainerConfig::default()
    };
    let mut session = Session::new(dataset, RiskPolicy::default(), trainer);

    if let TrainOutcome::Degraded { reason } = session.retrain()? {
        println!("training degraded ({reason}); prediction will be Unknown");
    }

    let input = LiveConditions {
        temperature_c: args.temperature,
        humidity_pct: args.humidity,
        wind_speed_kmh: args.wind,
        rainfall_mm: args.rainfall,
    };
    let prediction = session.predict(&input);
    println!(
        "{}°C, {}% humidity, {} km/h wind, {} mm rain → {} ({:.1}% confidence)",
        args.temperature, args.humidity, args.wind, args.rainfall,
        prediction.label,
        prediction.confidence * 100.0
    );

    Ok(())
}
