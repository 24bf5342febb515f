//! Click capture.
//!
//! Host adapters forward clicks on cart rows and product tiles here so
//! the next dialog open can resolve against what the operator actually
//! touched instead of guessing from markup alone.

use std::sync::Arc;

use tracing::debug;

use posinfo_product_cache::{ProductCache, SessionHints};

use crate::model::DomNode;
use crate::ports::ProductStore;

const CART_ROW_NAME_CLASSES: [&str; 5] =
    ["item-name", "product-name", "cart-item-name", "name", "title"];
const TILE_NAME_CLASSES: [&str; 4] = ["product-name", "name", "title", "product-title"];

pub struct ClickCapture {
    cache: Arc<ProductCache>,
    hints: Arc<SessionHints>,
    store: Arc<dyn ProductStore>,
}

impl ClickCapture {
    pub fn new(
        cache: Arc<ProductCache>,
        hints: Arc<SessionHints>,
        store: Arc<dyn ProductStore>,
    ) -> Self {
        Self { cache, hints, store }
    }

    /// A row in the open cart was clicked. Records the row's product name
    /// as the clicked hint when one can be read off the row.
    pub fn cart_row_clicked(&self, row: &DomNode) {
        let name = row
            .find_any_class(&CART_ROW_NAME_CLASSES)
            .map(|el| el.text_content())
            .or_else(|| row.find_tag("span").map(|el| el.text_content()));
        if let Some(name) = name {
            let name = name.trim().to_string();
            if name.chars().count() > 2 {
                debug!(target: "posinfo.capture", %name, "cart row clicked");
                self.hints.set_clicked(&name);
            }
        }
    }

    /// A product tile on the sell screen was clicked. When the tile carries
    /// a product id, the full record is fetched and cached ahead of the
    /// dialog; the tile's visible name still wins as the hint because
    /// catalog names and tile labels drift apart.
    pub async fn product_tile_clicked(&self, tile: &DomNode) {
        let id = tile
            .attr("data-product-id")
            .or_else(|| tile.attr("data-id"))
            .and_then(|raw| raw.parse::<u64>().ok());
        if let Some(id) = id {
            if let Some(product) = self.store.get_by_id(id).await {
                debug!(target: "posinfo.capture", id, name = %product.name, "tile product prefetched");
                self.cache.put(&product.name, product.clone());
                self.hints.set_last_seen(product.clone());
                self.hints.set_clicked(&product.name);
            }
        }
        if let Some(el) = tile.find_any_class(&TILE_NAME_CLASSES) {
            let name = el.text_content().trim().to_string();
            if name.chars().count() > 2 {
                self.hints.set_clicked(&name);
            }
        }
    }
}
