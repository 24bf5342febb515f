use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::load_overlay_config;

#[derive(Args, Clone)]
pub struct ConfigArgs {
    /// Overlay configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let config = load_overlay_config(args.config.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
