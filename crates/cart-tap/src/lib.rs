//! Cart tap: observes outgoing host requests for cart payloads and feeds
//! every contained product into the shared cache.
//!
//! The tap is a pure observer decorating the transport layer. It never
//! alters, delays or fails the underlying request; any parse problem is
//! swallowed and the request proceeds as if the tap did not exist.

pub mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use posinfo_core_types::ProductRecord;
use posinfo_event_bus::{EventBus, InMemoryBus};
use posinfo_product_cache::{ProductCache, SessionHints};

pub use wire::{extract_cart, CartItem, CartPayload};

/// Outgoing request as seen at the transport boundary.
#[derive(Clone, Debug)]
pub struct OutgoingRequest {
    pub url: String,
    pub body: RequestBody,
}

#[derive(Clone, Debug)]
pub enum RequestBody {
    /// Decoded multipart form fields, name/value pairs.
    Multipart(Vec<(String, String)>),
    /// Raw textual body: URL-encoded form or JSON.
    Text(String),
    Empty,
}

/// Signal published after a cart payload was folded into the cache, so the
/// dialog watcher can schedule a corrective re-render.
#[derive(Clone, Copy, Debug)]
pub struct CartObserved {
    pub products: usize,
}

/// Implemented by observers hung off the transport layer. Observation is
/// infallible by contract; implementations swallow their own errors.
#[async_trait]
pub trait TransportObserver: Send + Sync {
    async fn observe(&self, request: &OutgoingRequest);
}

pub struct CartTap {
    cache: Arc<ProductCache>,
    hints: Arc<SessionHints>,
    bus: Arc<InMemoryBus<CartObserved>>,
}

impl CartTap {
    pub fn new(
        cache: Arc<ProductCache>,
        hints: Arc<SessionHints>,
        bus: Arc<InMemoryBus<CartObserved>>,
    ) -> Self {
        Self { cache, hints, bus }
    }

    fn ingest(&self, payload: CartPayload) -> usize {
        let mut seen = 0usize;
        let mut last: Option<ProductRecord> = None;
        for item in payload.items {
            let Some(product) = item.product else {
                continue;
            };
            // A variant's embedded parent is indexed under its own name so
            // variant-selection dialogs can find the base record.
            if let Some(parent) = product.parent_product.as_deref() {
                self.cache.put(&parent.name, parent.clone());
            }
            self.cache.put(&product.name, product.clone());
            last = Some(product);
            seen += 1;
        }
        if let Some(product) = last {
            self.hints.set_last_seen(product);
        }
        seen
    }
}

#[async_trait]
impl TransportObserver for CartTap {
    async fn observe(&self, request: &OutgoingRequest) {
        let Some(payload) = extract_cart(&request.body) else {
            return;
        };
        if payload.items.is_empty() {
            return;
        }
        let products = self.ingest(payload);
        debug!(target: "posinfo.tap", url = %request.url, products, "cart payload observed");
        if products > 0 {
            if let Err(err) = self.bus.publish(CartObserved { products }).await {
                // No watcher subscribed yet; the cache update alone is fine.
                warn!(target: "posinfo.tap", %err, "cart signal dropped");
            }
        }
    }
}
