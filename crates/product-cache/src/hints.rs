//! Session-scoped hint state shared between the click capture, the cart
//! tap and the resolver. Replaces what the host-side variants kept as
//! page globals with one explicit context object.

use parking_lot::Mutex;

use posinfo_core_types::ProductRecord;

#[derive(Default)]
pub struct SessionHints {
    clicked_name: Mutex<Option<String>>,
    last_seen: Mutex<Option<ProductRecord>>,
}

impl SessionHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the display name of a just-clicked cart row or tile.
    /// Single-use: the next resolution that uses or supersedes the hint
    /// clears it, so a stale hint cannot leak into an unrelated dialog.
    pub fn set_clicked(&self, name: impl Into<String>) {
        *self.clicked_name.lock() = Some(name.into());
    }

    pub fn peek_clicked(&self) -> Option<String> {
        self.clicked_name.lock().clone()
    }

    pub fn take_clicked(&self) -> Option<String> {
        self.clicked_name.lock().take()
    }

    pub fn set_last_seen(&self, record: ProductRecord) {
        *self.last_seen.lock() = Some(record);
    }

    pub fn last_seen(&self) -> Option<ProductRecord> {
        self.last_seen.lock().clone()
    }
}
