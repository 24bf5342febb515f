//! JSON-file catalog backing the `ProductStore` port and the read API.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use posinfo_core_types::{normalize, ProductRecord};
use posinfo_dialog_perceiver::ProductStore;
use tracing::info;

use crate::errors::AppError;

/// Immutable catalog loaded at startup from a JSON array of records.
/// Name lookup mirrors the cache: exact normalized match first, then
/// bidirectional containment in load order.
pub struct CatalogStore {
    records: Vec<ProductRecord>,
    by_id: HashMap<u64, usize>,
}

impl CatalogStore {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ProductRecord> =
            serde_json::from_str(&raw).map_err(|source| AppError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::from_records(records);
        info!(target: "posinfo.store", path = %path.display(), products = store.len(), "catalog loaded");
        Ok(store)
    }

    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        Self { records, by_id }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&ProductRecord> {
        self.by_id.get(&id).map(|&i| &self.records[i])
    }

    fn lookup_name(&self, name: &str) -> Option<&ProductRecord> {
        let needle = normalize(name);
        if needle.is_empty() {
            return None;
        }
        if let Some(record) = self
            .records
            .iter()
            .find(|r| normalize(&r.name) == needle)
        {
            return Some(record);
        }
        self.records.iter().find(|r| {
            let key = normalize(&r.name);
            key.contains(&needle) || needle.contains(&key)
        })
    }
}

#[async_trait]
impl ProductStore for CatalogStore {
    async fn get_by_id(&self, id: u64) -> Option<ProductRecord> {
        self.get(id).cloned()
    }

    async fn find_by_name(&self, name: &str) -> Option<ProductRecord> {
        self.lookup_name(name).cloned()
    }
}
