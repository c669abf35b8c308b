/*!

This is the command line interface for planning, rendering and deploying the blueprint stages of
a platform pipeline.

!*/

mod deploy;
mod plan;
mod render;
mod stages;

use anyhow::{Context, Result};
use blueprint_addons::Pipeline;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::path::PathBuf;

/// The command line interface for deploying a platform pipeline's blueprints to Kubernetes.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// Path to the kubeconfig file. Also can be passed with the KUBECONFIG environment variable.
    #[clap(long = "kubeconfig")]
    kubeconfig: Option<PathBuf>,
    /// Path to the pipeline file.
    #[clap(long = "pipeline", short = 'p', env = "BLUEPRINT_PIPELINE")]
    pipeline: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// List the waves and stages of the pipeline.
    Stages(stages::Stages),
    /// Show the order in which addons are installed.
    Plan(plan::Plan),
    /// Print the values each addon of a stage is installed with.
    Render(render::Render),
    /// Deploy a stage's addons to a cluster.
    Deploy(deploy::Deploy),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    if let Err(e) = run(args).await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let pipeline = Pipeline::from_path(&args.pipeline).context(format!(
        "Unable to load pipeline from '{}'",
        args.pipeline.display()
    ))?;
    match args.command {
        Command::Stages(stages) => stages.run(pipeline),
        Command::Plan(plan) => plan.run(pipeline),
        Command::Render(render) => render.run(pipeline),
        Command::Deploy(deploy) => deploy.run(pipeline, args.kubeconfig).await,
    }
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use the default log level for our crates.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .filter(Some("blueprint_model"), level)
                .filter(Some("blueprint_addons"), level)
                .init();
        }
    }
}
