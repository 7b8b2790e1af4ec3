//! Training report tool: synthesize a dataset, run the full pipeline, and
//! print accuracy, feature importance, and risk patterns.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stormrisk_core::{
    synthesize_dataset, PatternObservation, RiskLevel, RiskPolicy, Session, TrainOutcome,
    TrainerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "report", about = "Train the risk classifier on a synthetic dataset and report")]
struct Args {
    /// Seed for the synthetic dataset and the trainer.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Serializable view of a training run for `--json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    seed: u64,
    label_counts: [usize; 3],
    accuracy: f64,
    n_train: usize,
    n_test: usize,
    class_recall: &'a [(RiskLevel, f64)],
    feature_importance: &'a [(String, f64)],
    degraded: Option<String>,
    patterns: &'a [PatternObservation],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report=info,stormrisk_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let dataset = synthesize_dataset(args.seed, Utc::now().date_naive());
    if !args.json {
        println!(
            "dataset: {} weather days, {} events ({:?})",
            dataset.weather.len(),
            dataset.disasters.len(),
            dataset.provenance
        );
    }

    let trainer = TrainerConfig {
        seed: args.seed,
        ..TrainerConfig::default()
    };
    let mut session = Session::new(dataset, RiskPolicy::default(), trainer);

    let label_counts = session.derive().label_counts();
    let outcome = session.retrain()?;
    let observations = session.patterns();

    if args.json {
        let (class_recall, n_train, n_test, degraded): (&[_], _, _, _) = match &outcome {
            TrainOutcome::Trained(bundle) => (&bundle.class_recall, bundle.n_train, bundle.n_test, None),
            TrainOutcome::Degraded { reason } => (&[], 0, 0, Some(reason.to_string())),
        };
        let report = JsonReport {
            seed: args.seed,
            label_counts,
            accuracy: outcome.accuracy(),
            n_train,
            n_test,
            class_recall,
            feature_importance: outcome.feature_importance(),
            degraded,
            patterns: &observations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let [safe, warning, danger] = label_counts;
    println!("labels: {safe} Safe / {warning} Warning / {danger} Danger");

    match &outcome {
        TrainOutcome::Trained(bundle) => {
            println!(
                "accuracy: {:.1}% on {} held-out rows ({} trained)",
                bundle.accuracy * 100.0,
                bundle.n_test,
                bundle.n_train
            );
            for (level, recall) in &bundle.class_recall {
                println!("  recall[{level}]: {:.1}%", recall * 100.0);
            }

            let mut importance = bundle.feature_importance.clone();
            importance.sort_by(|a, b| b.1.total_cmp(&a.1));
            println!("feature importance:");
            for (name, weight) in &importance {
                println!("  {name:<14} {weight:.3}");
            }
        }
        TrainOutcome::Degraded { reason } => {
            println!("training degraded: {reason}");
        }
    }

    if observations.is_empty() {
        println!("no extreme-feature days in the table");
    } else {
        println!("risk patterns:");
        for obs in &observations {
            println!("  - {}", obs.summary);
        }
    }

    Ok(())
}
