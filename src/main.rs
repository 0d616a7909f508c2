// Diabetes Predictor - Linear regression trainer and prediction service
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use diabetes_predictor::config::{load_config, Config};
use diabetes_predictor::server::PredictorServer;
use diabetes_predictor::training::Trainer;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "diabetes-predictor")]
#[command(about = "Train and serve a linear regression model", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit the model on the bundled dataset and write the artifact
    Train {
        /// Config file (default: ./predictor.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Where to write the model artifact
        #[arg(long = "model-path")]
        model_path: Option<PathBuf>,

        /// Seed for the train/test split
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve predictions over HTTP
    Serve {
        /// Config file (default: ./predictor.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bind address (default: 0.0.0.0:5000)
        #[arg(long)]
        bind: Option<String>,

        /// Model artifact to load at startup
        #[arg(long = "model-path")]
        model_path: Option<PathBuf>,

        /// Prediction log file
        #[arg(long = "log-path")]
        log_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Train {
            config,
            model_path,
            seed,
        } => {
            init_tracing(false);
            let mut config = load_config(config.as_deref())?;
            if let Some(path) = model_path {
                config.trainer.model_path = path;
            }
            if let Some(seed) = seed {
                config.trainer.seed = seed;
            }
            run_train(config)
        }
        Command::Serve {
            config,
            bind,
            model_path,
            log_path,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            if let Some(path) = model_path {
                config.server.model_path = path;
            }
            if let Some(path) = log_path {
                config.server.log_path = path;
            }
            init_tracing(config.server.debug);
            run_serve(config).await
        }
    }
}

/// Initialize tracing to stderr.
///
/// Default: INFO level, or DEBUG when `debug` is set. RUST_LOG always wins.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

/// Train the model once and exit
fn run_train(config: Config) -> Result<()> {
    let model_path = config.trainer.model_path.clone();
    let result = Trainer::new(config.trainer).run()?;

    println!(
        "Trained on {} rows, held out {} (R² {:.4}, MSE {:.2}) in {:.3}s",
        result.train_rows,
        result.test_rows,
        result.artifact.evaluation.r2,
        result.artifact.evaluation.mse,
        result.duration_secs
    );
    println!("Trained model saved as {}", model_path.display());

    Ok(())
}

/// Load the model and serve until interrupted
async fn run_serve(config: Config) -> Result<()> {
    if config.server.debug {
        tracing::warn!("Debug logging enabled; not intended for production");
    }

    let server = PredictorServer::load(config.server)?;
    eprintln!("Prediction log: {}", server.config().log_path.display());

    server.serve().await
}
