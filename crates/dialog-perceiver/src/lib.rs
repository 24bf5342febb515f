//! Dialog perception and product-info mounting.
//!
//! Watches host dialog opens, reconciles the racing data channels (cart
//! tap, click capture, catalog store) into one product record, and mounts
//! a rendered info fragment into the dialog.

pub mod capture;
pub mod classify;
mod events;
pub mod extract;
pub mod model;
pub mod ports;
pub mod render;
pub mod resolver;
pub mod surface;
pub mod watcher;

pub use capture::ClickCapture;
pub use classify::{classify, VARIANT_OPTIONS_TAG};
pub use extract::extract_name;
pub use model::DomNode;
pub use ports::{DialogSurface, NullStore, ProductStore};
pub use render::{render, InfoFragment, PriceTier, Row, RowValue, INFO_BOX_ID};
pub use resolver::{Resolution, ResolutionContext, Resolver};
pub use surface::MemorySurface;
pub use watcher::{
    find_dialog_roots, DialogWatcher, PageEvent, WatcherConfig, DIALOG_ROOT_CLASS,
    OVERLAY_PANE_CLASS,
};
