//! CLI and read API for the POS product-info overlay engine.
//!
//! The reconciliation engine itself lives in the workspace crates; this
//! package wires a JSON catalog behind the `ProductStore` port and serves
//! the `oppi/v1` read endpoint host pages fetch enrichment data from.

pub mod cli;
pub mod config;
pub mod errors;
pub mod server;
pub mod store;

pub use errors::AppError;
pub use store::CatalogStore;
