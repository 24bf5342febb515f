//! Dialog watcher: consumes page and cart observations and drives the
//! resolve-render-mount pipeline for each dialog open.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::select;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use posinfo_cart_tap::CartObserved;
use posinfo_core_types::{DialogId, DialogKind, OverlayConfig};
use posinfo_event_bus::{EventBus, InMemoryBus};
use posinfo_product_cache::{ProductCache, SessionHints};

use crate::capture::ClickCapture;
use crate::classify::classify;
use crate::events::{emit_mount, emit_resolution, emit_skip};
use crate::extract::extract_name;
use crate::model::DomNode;
use crate::ports::{DialogSurface, ProductStore};
use crate::render::render;
use crate::resolver::{Resolution, ResolutionContext, Resolver};

/// Class the host puts on every dialog container element.
pub const DIALOG_ROOT_CLASS: &str = "mat-dialog-container";
/// Overlay wrapper the host sometimes inserts dialogs under.
pub const OVERLAY_PANE_CLASS: &str = "cdk-overlay-pane";

/// Page observations forwarded by host adapters.
#[derive(Clone, Debug)]
pub enum PageEvent {
    DialogOpened { dialog: DialogId },
    DialogClosed { dialog: DialogId },
    CartRowClicked { row: DomNode },
    ProductTileClicked { tile: DomNode },
}

#[derive(Clone, Copy, Debug)]
pub struct WatcherConfig {
    /// Delay between a dialog sighting and its snapshot; the host renders
    /// dialog content asynchronously after attaching the container.
    pub settle_ms: u64,
    /// Delay between a cart observation and the corrective re-render pass.
    pub debounce_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            debounce_ms: 100,
        }
    }
}

/// Dialog container roots inside an attached subtree: the node itself,
/// containers nested under it, and containers under an overlay pane.
pub fn find_dialog_roots(added: &DomNode) -> Vec<&DomNode> {
    let mut roots = Vec::new();
    collect_dialog_roots(added, &mut roots);
    roots
}

fn collect_dialog_roots<'a>(node: &'a DomNode, out: &mut Vec<&'a DomNode>) {
    if node.has_class(DIALOG_ROOT_CLASS) {
        out.push(node);
        return;
    }
    for child in &node.children {
        collect_dialog_roots(child, out);
    }
}

pub struct DialogWatcher {
    inner: Arc<WatcherInner>,
    task: Option<JoinHandle<()>>,
    shutdown: CancellationToken,
}

struct WatcherInner {
    surface: Arc<dyn DialogSurface>,
    resolver: Resolver,
    capture: ClickCapture,
    cache: Arc<ProductCache>,
    overlay: OverlayConfig,
    config: WatcherConfig,
    processed: DashMap<DialogId, ()>,
    current: Mutex<Option<DialogId>>,
}

impl DialogWatcher {
    pub fn new(
        surface: Arc<dyn DialogSurface>,
        store: Arc<dyn ProductStore>,
        cache: Arc<ProductCache>,
        hints: Arc<SessionHints>,
        overlay: OverlayConfig,
        config: WatcherConfig,
    ) -> Self {
        let inner = Arc::new(WatcherInner {
            surface,
            resolver: Resolver::new(cache.clone(), hints.clone(), store.clone()),
            capture: ClickCapture::new(cache.clone(), hints, store),
            cache,
            overlay,
            config,
            processed: DashMap::new(),
            current: Mutex::new(None),
        });
        Self {
            inner,
            task: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Start consuming both buses. Replaces any previous run.
    pub fn start(
        &mut self,
        pages: Arc<InMemoryBus<PageEvent>>,
        carts: Arc<InMemoryBus<CartObserved>>,
    ) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }

        let inner = Arc::clone(&self.inner);
        let shutdown = self.shutdown.clone();
        let mut page_rx = pages.subscribe();
        let mut cart_rx = carts.subscribe();

        self.task = Some(tokio::spawn(async move {
            debug!(target: "posinfo.perceiver", "dialog watcher started");
            loop {
                select! {
                    _ = shutdown.cancelled() => {
                        debug!(target: "posinfo.perceiver", "dialog watcher shutting down");
                        break;
                    }
                    event = page_rx.recv() => {
                        match event {
                            Ok(event) => inner.clone().dispatch_page(event),
                            Err(err) => {
                                warn!(?err, "page event channel closed");
                                break;
                            }
                        }
                    }
                    signal = cart_rx.recv() => {
                        match signal {
                            Ok(_) => {
                                let inner = inner.clone();
                                tokio::spawn(async move {
                                    inner.corrective_rerender().await;
                                });
                            }
                            Err(err) => {
                                warn!(?err, "cart signal channel closed");
                                break;
                            }
                        }
                    }
                }
            }
            debug!(target: "posinfo.perceiver", "dialog watcher exited");
        }));
    }

    pub async fn stop(&mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.task.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for DialogWatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
    }
}

impl WatcherInner {
    fn dispatch_page(self: Arc<Self>, event: PageEvent) {
        match event {
            PageEvent::DialogOpened { dialog } => {
                tokio::spawn(async move {
                    self.process_dialog(dialog).await;
                });
            }
            PageEvent::DialogClosed { dialog } => {
                let mut current = self.current.lock();
                if *current == Some(dialog) {
                    *current = None;
                }
            }
            PageEvent::CartRowClicked { row } => {
                self.capture.cart_row_clicked(&row);
            }
            PageEvent::ProductTileClicked { tile } => {
                tokio::spawn(async move {
                    self.capture.product_tile_clicked(&tile).await;
                });
            }
        }
    }

    async fn process_dialog(&self, dialog: DialogId) {
        // Mutation feeds sight the same logical open repeatedly.
        if self.processed.insert(dialog, ()).is_some() {
            emit_skip(dialog, "already-processed");
            return;
        }
        *self.current.lock() = Some(dialog);

        sleep(Duration::from_millis(self.config.settle_ms)).await;

        let Some(root) = self.surface.snapshot(dialog).await else {
            emit_skip(dialog, "detached");
            return;
        };
        let kind = classify(&root);
        let extracted = extract_name(&root, kind);

        let record = match self
            .resolver
            .resolve(&ResolutionContext {
                kind,
                extracted_name: extracted,
            })
            .await
        {
            Resolution::Resolved(record) => record,
            Resolution::Unresolved => {
                emit_skip(dialog, "unresolved");
                return;
            }
        };
        emit_resolution(dialog, kind, if record.from_dom { "placeholder" } else { "record" }, record.id);

        // A real record already mounted for this dialog stays; a
        // placeholder never suppresses a mount.
        if !record.from_dom {
            if self.surface.mounted_product(dialog).await == Some(record.id) {
                emit_skip(dialog, "already-mounted");
                return;
            }
        }

        let Some(fragment) = render(&record, kind, &self.overlay) else {
            emit_skip(dialog, "nothing-to-render");
            return;
        };
        let id = fragment.product_id;
        if self.surface.mount(dialog, fragment).await {
            emit_mount(dialog, id, false);
        } else {
            emit_skip(dialog, "closed-before-mount");
        }
    }

    /// Cart data often lands just after a dialog resolved to nothing or a
    /// placeholder. Once the tap has cached it, re-read the open dialog
    /// and mount the now-available record.
    async fn corrective_rerender(&self) {
        sleep(Duration::from_millis(self.config.debounce_ms)).await;

        let Some(dialog) = *self.current.lock() else {
            return;
        };
        if self.surface.mounted_product(dialog).await.is_some() {
            return;
        }
        let Some(root) = self.surface.snapshot(dialog).await else {
            return;
        };
        let kind = classify(&root);
        let Some(name) = extract_name(&root, kind) else {
            return;
        };
        let Some(record) = self.cache.find_fuzzy(&name) else {
            return;
        };
        if kind == DialogKind::VariantSelection && record.is_variant() {
            return;
        }
        let Some(fragment) = render(&record, kind, &self.overlay) else {
            return;
        };
        let id = fragment.product_id;
        if self.surface.mount(dialog, fragment).await {
            emit_mount(dialog, id, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_root_on_the_added_node_itself() {
        let node = DomNode::new("div").with_class(DIALOG_ROOT_CLASS);
        assert_eq!(find_dialog_roots(&node).len(), 1);
    }

    #[test]
    fn dialog_roots_nested_under_an_overlay_pane() {
        let node = DomNode::new("div").with_class(OVERLAY_PANE_CLASS).with_child(
            DomNode::new("div")
                .with_child(DomNode::new("div").with_class(DIALOG_ROOT_CLASS))
                .with_child(DomNode::new("div").with_class(DIALOG_ROOT_CLASS)),
        );
        assert_eq!(find_dialog_roots(&node).len(), 2);
    }

    #[test]
    fn nested_containers_are_not_double_counted() {
        let node = DomNode::new("div").with_class(DIALOG_ROOT_CLASS).with_child(
            DomNode::new("div").with_class(DIALOG_ROOT_CLASS),
        );
        assert_eq!(find_dialog_roots(&node).len(), 1);
    }

    #[test]
    fn unrelated_subtrees_yield_nothing() {
        let node = DomNode::new("div").with_child(DomNode::new("span").with_text("hi"));
        assert!(find_dialog_roots(&node).is_empty());
    }
}
