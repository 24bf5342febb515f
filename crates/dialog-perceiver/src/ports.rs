//! Host-facing ports. The watcher drives these; adapters for a concrete
//! host (REST catalog, live page bridge) implement them.

use async_trait::async_trait;

use posinfo_core_types::{DialogId, ProductRecord};

use crate::model::DomNode;
use crate::render::InfoFragment;

/// Catalog lookups. Backed by the persisted store in production, by
/// fixtures in tests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_by_id(&self, id: u64) -> Option<ProductRecord>;
    async fn find_by_name(&self, name: &str) -> Option<ProductRecord>;
}

/// The dialog layer of the host page as the watcher sees it.
#[async_trait]
pub trait DialogSurface: Send + Sync {
    /// Current subtree of the dialog, or None when it already closed.
    async fn snapshot(&self, dialog: DialogId) -> Option<DomNode>;

    /// Product id of an info fragment already mounted in this dialog by
    /// someone (including a previous pass of ours), if any.
    async fn mounted_product(&self, dialog: DialogId) -> Option<u64>;

    /// Mount the fragment, replacing any previous one. Returns false when
    /// the dialog vanished before the mount landed.
    async fn mount(&self, dialog: DialogId, fragment: InfoFragment) -> bool;
}

/// Store with no products. Covers hosts running without a catalog
/// connection; doubles as the inert store in tests.
pub struct NullStore;

#[async_trait]
impl ProductStore for NullStore {
    async fn get_by_id(&self, _id: u64) -> Option<ProductRecord> {
        None
    }

    async fn find_by_name(&self, _name: &str) -> Option<ProductRecord> {
        None
    }
}
