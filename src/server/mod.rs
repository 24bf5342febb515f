//! Read API exposing enriched product records to host pages.

mod router;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::errors::AppError;
use crate::store::CatalogStore;

pub(crate) use router::build_router;
pub(crate) use state::ServeState;

pub async fn serve(addr: SocketAddr, store: Arc<CatalogStore>) -> Result<(), AppError> {
    let router = build_router(ServeState::new(store));
    let listener = TcpListener::bind(addr).await?;
    info!(target: "posinfo.server", %addr, "read API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
