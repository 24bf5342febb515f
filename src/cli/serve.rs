use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::config::load_overlay_config;
use crate::server;
use crate::store::CatalogStore;

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Address to bind the read API on
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: String,

    /// JSON catalog file, an array of product records
    #[arg(long)]
    pub catalog: PathBuf,

    /// Overlay configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // The overlay config is not consumed by the read API itself; loading
    // it here surfaces file and env mistakes at startup instead of on the
    // first host page load.
    let config = load_overlay_config(args.config.as_deref())?;
    info!(
        max_description_length = config.max_description_length,
        "overlay configuration loaded"
    );

    let addr: SocketAddr = args
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", args.bind))?;
    let store = Arc::new(CatalogStore::load(&args.catalog)?);

    server::serve(addr, store).await?;
    Ok(())
}
