// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction. Parses arguments
// with clap and hands off to Layer 2 (application) or the
// HTTP layer.
//
// Three commands are supported:
//   1. `serve`   — run the HTTP service
//   2. `train`   — train offline from a CSV file
//   3. `predict` — classify one reading from the saved artifact
//
// `train` and `predict` exercise exactly the same use cases
// and artifact format as the HTTP endpoints, so a model
// trained from the command line can be served and vice versa.

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, PredictArgs, ServeArgs, TrainArgs};
use std::sync::Arc;

use crate::application::context::{ServiceConfig, ServiceContext};
use crate::application::train_use_case::TrainUseCase;
use crate::data::loader::CsvLoader;
use crate::domain::reading::MachineReading;
use crate::infra::checkpoint::ModelStore;
use crate::ml::inferencer::Inferencer;

#[derive(Parser, Debug)]
#[command(
    name = "downtime-api",
    version,
    about = "Upload machine readings, train a downtime classifier, and predict over HTTP."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve(args)   => run_serve(args),
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

/// Builds the tokio runtime here rather than in main, so the
/// offline commands stay plain synchronous code.
fn run_serve(args: ServeArgs) -> Result<()> {
    let bind   = args.bind;
    let config = ServiceConfig::from(args);
    tracing::info!("Starting service with {:?}", config.train);

    let ctx = Arc::new(ServiceContext::new(config));

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(crate::api::serve(ctx, bind))
}

fn run_train(args: TrainArgs) -> Result<()> {
    let dataset  = CsvLoader::new().load_file(&args.data)?;
    let use_case = TrainUseCase::new(
        args.training.into(),
        ModelStore::new(args.artifact_path.clone()),
        args.metrics_log,
    );

    let outcome = use_case.execute(&dataset)?;
    let report  = outcome.report;

    println!(
        "Trained on {} rows, evaluated on {}: accuracy={:.4} f1_score={:.4}",
        report.train_rows, report.test_rows, report.metrics.accuracy, report.metrics.f1_score
    );
    println!("Model saved to '{}'", args.artifact_path.display());
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let inferencer = Inferencer::from_store(&ModelStore::new(args.artifact_path))
        .context("Model not trained or unavailable. Run `train` first.")?;

    let prediction = inferencer.predict(&MachineReading::new(args.temperature, args.run_time));
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
