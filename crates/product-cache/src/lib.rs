//! Process-lifetime mapping from normalized product name to the most
//! recently observed product record.
//!
//! Last-write-wins per name, no eviction; the cache is bounded only by the
//! session lifetime of the page. Insertion order is kept so fuzzy lookups
//! break ties on the first-inserted entry.

pub mod hints;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use posinfo_core_types::{normalize, ProductRecord};

pub use hints::SessionHints;

#[derive(Default)]
pub struct ProductCache {
    entries: RwLock<IndexMap<String, ProductRecord>>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record under the normalized form of `name`.
    /// Overwriting keeps the entry's original position.
    pub fn put(&self, name: &str, record: ProductRecord) {
        let key = normalize(name);
        if key.is_empty() {
            return;
        }
        debug!(target: "posinfo.cache", %key, id = record.id, "cache put");
        self.entries.write().insert(key, record);
    }

    /// Lookup under the normalized form of `name`.
    pub fn get_exact(&self, name: &str) -> Option<ProductRecord> {
        let key = normalize(name);
        self.entries.read().get(&key).cloned()
    }

    /// Exact lookup first; on miss, the first entry (insertion order) whose
    /// key contains the query or is contained by it. Cart displays truncate
    /// long names, so containment is checked both ways.
    pub fn find_fuzzy(&self, name: &str) -> Option<ProductRecord> {
        let query = normalize(name);
        if query.is_empty() {
            return None;
        }
        let entries = self.entries.read();
        if let Some(record) = entries.get(&query) {
            return Some(record.clone());
        }
        entries
            .iter()
            .find(|(key, _)| key.contains(&query) || query.contains(key.as_str()))
            .map(|(_, record)| record.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str) -> ProductRecord {
        ProductRecord {
            id,
            name: name.to_string(),
            ..ProductRecord::default()
        }
    }

    #[test]
    fn put_then_get_exact_ignores_case_and_spacing() {
        let cache = ProductCache::new();
        cache.put("Arpillera 10oz  Rollo 50m", record(42, "Arpillera 10oz Rollo 50m"));
        let hit = cache.get_exact("  arpillera 10OZ rollo 50M ").expect("hit");
        assert_eq!(hit.id, 42);
    }

    #[test]
    fn last_write_wins_per_name() {
        let cache = ProductCache::new();
        cache.put("Cinta", record(1, "Cinta"));
        cache.put("cinta", record(2, "Cinta"));
        assert_eq!(cache.get_exact("Cinta").unwrap().id, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn find_fuzzy_on_empty_cache_is_none() {
        let cache = ProductCache::new();
        assert!(cache.find_fuzzy("anything").is_none());
    }

    #[test]
    fn find_fuzzy_matches_truncated_query() {
        let cache = ProductCache::new();
        cache.put("Arpillera 10oz Rollo 50m", record(42, "Arpillera 10oz Rollo 50m"));
        let hit = cache.find_fuzzy("Arpillera 10oz").expect("containment hit");
        assert_eq!(hit.id, 42);
    }

    #[test]
    fn find_fuzzy_matches_longer_query() {
        let cache = ProductCache::new();
        cache.put("Cinta", record(7, "Cinta"));
        let hit = cache.find_fuzzy("Cinta Adhesiva 48mm").expect("reverse containment");
        assert_eq!(hit.id, 7);
    }

    #[test]
    fn find_fuzzy_tie_break_is_first_inserted() {
        let cache = ProductCache::new();
        cache.put("Polera Roja M", record(1, "Polera Roja M"));
        cache.put("Polera Roja L", record(2, "Polera Roja L"));
        let hit = cache.find_fuzzy("Polera Roja").expect("hit");
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn find_fuzzy_prefers_exact_over_containment() {
        let cache = ProductCache::new();
        cache.put("Polera Roja M", record(1, "Polera Roja M"));
        cache.put("Polera", record(3, "Polera"));
        let hit = cache.find_fuzzy("Polera").expect("hit");
        assert_eq!(hit.id, 3);
    }

    #[test]
    fn empty_names_are_never_indexed() {
        let cache = ProductCache::new();
        cache.put("   ", record(1, ""));
        assert!(cache.is_empty());
        assert!(cache.find_fuzzy("").is_none());
    }
}
