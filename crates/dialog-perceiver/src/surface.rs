//! In-memory dialog surface.
//!
//! Stands in for a live page bridge: tests and the demo server open and
//! close dialogs on it directly and inspect what got mounted.

use async_trait::async_trait;
use dashmap::DashMap;

use posinfo_core_types::DialogId;

use crate::model::DomNode;
use crate::ports::DialogSurface;
use crate::render::InfoFragment;

#[derive(Default)]
pub struct MemorySurface {
    dialogs: DashMap<DialogId, DomNode>,
    mounted: DashMap<DialogId, InfoFragment>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, root: DomNode) -> DialogId {
        let id = DialogId::new();
        self.dialogs.insert(id, root);
        id
    }

    /// Replace the dialog subtree, as a host mutation would.
    pub fn update(&self, dialog: DialogId, root: DomNode) {
        self.dialogs.insert(dialog, root);
    }

    pub fn close(&self, dialog: DialogId) {
        self.dialogs.remove(&dialog);
        self.mounted.remove(&dialog);
    }

    pub fn mounted_fragment(&self, dialog: DialogId) -> Option<InfoFragment> {
        self.mounted.get(&dialog).map(|f| f.value().clone())
    }
}

#[async_trait]
impl DialogSurface for MemorySurface {
    async fn snapshot(&self, dialog: DialogId) -> Option<DomNode> {
        self.dialogs.get(&dialog).map(|d| d.value().clone())
    }

    async fn mounted_product(&self, dialog: DialogId) -> Option<u64> {
        self.mounted.get(&dialog).map(|f| f.product_id)
    }

    async fn mount(&self, dialog: DialogId, fragment: InfoFragment) -> bool {
        if !self.dialogs.contains_key(&dialog) {
            return false;
        }
        self.mounted.insert(dialog, fragment);
        true
    }
}
