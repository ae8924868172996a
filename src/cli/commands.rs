// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `serve`, `train` and `predict`
// and all their configurable flags.
//
// Every service flag can also come from a DOWNTIME_* environment
// variable, so a container can be configured without a wrapper
// script.
//
// Reference: clap derive documentation (Args, Subcommand, env)

use clap::{Args, Subcommand};
use std::{net::SocketAddr, path::PathBuf};

use crate::application::context::{ServiceConfig, DEFAULT_ARTIFACT_PATH};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service (/upload, /train, /predict)
    Serve(ServeArgs),

    /// Train on a CSV file and write the model artifact
    Train(TrainArgs),

    /// Predict downtime for one reading using the saved artifact
    Predict(PredictArgs),
}

/// Hyperparameters shared by `serve` and `train`.
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    /// Share of rows held out to compute accuracy and F1
    #[arg(long, env = "DOWNTIME_TEST_FRACTION", default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test split and the bootstrap sampler
    #[arg(long, env = "DOWNTIME_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Number of trees in the forest
    #[arg(long, env = "DOWNTIME_N_TREES", default_value_t = 100)]
    pub n_trees: usize,

    /// Depth limit per tree (unlimited when omitted)
    #[arg(long, env = "DOWNTIME_MAX_DEPTH")]
    pub max_depth: Option<usize>,
}

impl From<TrainingArgs> for TrainConfig {
    fn from(a: TrainingArgs) -> Self {
        TrainConfig {
            test_fraction: a.test_fraction,
            seed:          a.seed,
            n_trees:       a.n_trees,
            max_depth:     a.max_depth,
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "DOWNTIME_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Where the trained model is written and read back from
    #[arg(long, env = "DOWNTIME_ARTIFACT_PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact_path: PathBuf,

    /// Append one CSV row per training run to this file
    #[arg(long, env = "DOWNTIME_METRICS_LOG")]
    pub metrics_log: Option<PathBuf>,

    #[command(flatten)]
    pub training: TrainingArgs,
}

impl From<ServeArgs> for ServiceConfig {
    fn from(a: ServeArgs) -> Self {
        ServiceConfig {
            artifact_path: a.artifact_path,
            metrics_log:   a.metrics_log,
            train:         a.training.into(),
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with Machine_ID, Temperature, Run_Time and Downtime_Flag
    #[arg(long)]
    pub data: PathBuf,

    #[arg(long, env = "DOWNTIME_ARTIFACT_PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact_path: PathBuf,

    #[arg(long, env = "DOWNTIME_METRICS_LOG")]
    pub metrics_log: Option<PathBuf>,

    #[command(flatten)]
    pub training: TrainingArgs,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub run_time: f64,

    #[arg(long, env = "DOWNTIME_ARTIFACT_PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact_path: PathBuf,
}
