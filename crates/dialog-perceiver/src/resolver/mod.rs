//! Product resolution.
//!
//! A dialog open races three channels that each may or may not have fired
//! yet: the cart tap, click capture and the catalog store. Resolution
//! walks fixed strategy ladders per dialog kind so the outcome is
//! deterministic regardless of which channels won the race.

use std::sync::Arc;

use tracing::debug;

use posinfo_core_types::{normalize, DialogKind, ProductRecord};
use posinfo_product_cache::{ProductCache, SessionHints};

use crate::ports::ProductStore;

#[derive(Clone, Debug)]
pub enum Resolution {
    Resolved(ProductRecord),
    Unresolved,
}

#[derive(Clone, Debug)]
pub struct ResolutionContext {
    pub kind: DialogKind,
    pub extracted_name: Option<String>,
}

pub struct Resolver {
    cache: Arc<ProductCache>,
    hints: Arc<SessionHints>,
    store: Arc<dyn ProductStore>,
}

impl Resolver {
    pub fn new(
        cache: Arc<ProductCache>,
        hints: Arc<SessionHints>,
        store: Arc<dyn ProductStore>,
    ) -> Self {
        Self { cache, hints, store }
    }

    pub async fn resolve(&self, ctx: &ResolutionContext) -> Resolution {
        match ctx.kind {
            DialogKind::Simple => self.resolve_simple(ctx).await,
            DialogKind::VariantSelection => self.resolve_variant(ctx).await,
        }
    }

    /// Variant selection always needs the parent record. A cached or
    /// stored record only counts when it is not itself a variant, and a
    /// placeholder is never acceptable here since the dialog's own markup
    /// already shows the variant grid.
    async fn resolve_variant(&self, ctx: &ResolutionContext) -> Resolution {
        let Some(name) = ctx.extracted_name.as_deref() else {
            return Resolution::Unresolved;
        };
        if let Some(record) = self.cache.find_fuzzy(name) {
            if !record.is_variant() {
                self.emit(ctx.kind, "cache-name", &record);
                return Resolution::Resolved(record);
            }
        }
        if let Some(record) = self.store.find_by_name(name).await {
            self.cache.put(&record.name, record.clone());
            self.emit(ctx.kind, "store", &record);
            return Resolution::Resolved(record);
        }
        Resolution::Unresolved
    }

    async fn resolve_simple(&self, ctx: &ResolutionContext) -> Resolution {
        // 1. Extracted name against the cache. A hit supersedes any
        //    pending click hint, which is consumed so it cannot leak.
        if let Some(name) = ctx.extracted_name.as_deref() {
            if let Some(record) = self.cache.find_fuzzy(name) {
                self.hints.take_clicked();
                self.emit(ctx.kind, "cache-name", &record);
                return Resolution::Resolved(record);
            }
        }

        // 2. Pending click hint against the cache, consumed either way.
        if let Some(clicked) = self.hints.take_clicked() {
            if let Some(record) = self.cache.find_fuzzy(&clicked) {
                self.emit(ctx.kind, "clicked-hint", &record);
                return Resolution::Resolved(record);
            }
        }

        // 3. Most recent cart product, but only when it plausibly matches
        //    the dialog: same normalized name, or the dialog yielded no
        //    name at all.
        if let Some(record) = self.hints.last_seen() {
            let plausible = match ctx.extracted_name.as_deref() {
                Some(name) => normalize(name) == normalize(&record.name),
                None => true,
            };
            if plausible {
                self.emit(ctx.kind, "last-seen", &record);
                return Resolution::Resolved(record);
            }
        }

        // 4. Catalog lookup by name, cached for the rest of the session.
        if let Some(name) = ctx.extracted_name.as_deref() {
            if let Some(record) = self.store.find_by_name(name).await {
                self.cache.put(&record.name, record.clone());
                self.emit(ctx.kind, "store", &record);
                return Resolution::Resolved(record);
            }

            // 5. Placeholder carrying just the extracted name, so the
            //    dialog still gets an info box the cart tap can correct.
            let record = ProductRecord::placeholder(name);
            self.emit(ctx.kind, "placeholder", &record);
            return Resolution::Resolved(record);
        }

        Resolution::Unresolved
    }

    fn emit(&self, kind: DialogKind, strategy: &str, record: &ProductRecord) {
        debug!(
            target: "posinfo.resolver",
            ?kind,
            strategy,
            id = record.id,
            name = %record.name,
            "product resolved"
        );
    }
}
