//! Shared primitives for the POS product info overlay crates.

pub mod config;
pub mod record;
mod wire;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use config::{Labels, OverlayConfig};
pub use record::{
    CategoryEntry, CustomMeta, PriceRule, ProductAttribute, ProductRecord, StockInfo,
};

/// Shared error type for the overlay crates.
#[derive(Debug, Error, Clone)]
pub enum OverlayError {
    #[error("{message}")]
    Message { message: String },
}

impl OverlayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Identifier for one live dialog instance in the host page.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DialogId(pub Uuid);

impl DialogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

/// The two dialog shapes the host renders; the kind drives the whole
/// resolution and rendering strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DialogKind {
    /// Single product or cart-line dialog.
    Simple,
    /// Variant-selection dialog shown before a specific variant is picked.
    VariantSelection,
}

/// Canonicalize a display name for equality and containment comparison:
/// trim, lowercase, collapse internal whitespace.
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
