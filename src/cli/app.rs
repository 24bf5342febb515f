use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use super::config::{run_config, ConfigArgs};
use super::serve::{run_serve, ServeArgs};

#[derive(Parser)]
#[command(name = "posinfo", version, about = "Product info overlay engine for POS frontends")]
pub struct CliArgs {
    /// Log filter, overridden by RUST_LOG when set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the product read API from a JSON catalog
    Serve(ServeArgs),
    /// Print the effective overlay configuration as JSON
    Config(ConfigArgs),
}

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();
    init_logging(&cli.log_level);

    let outcome = match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Config(args) => run_config(args),
    };
    if let Err(err) = &outcome {
        error!("command failed: {err:#}");
    }
    outcome
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
