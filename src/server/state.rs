use std::sync::Arc;

use crate::store::CatalogStore;

#[derive(Clone)]
pub(crate) struct ServeState {
    pub(crate) store: Arc<CatalogStore>,
}

impl ServeState {
    pub(crate) fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}
