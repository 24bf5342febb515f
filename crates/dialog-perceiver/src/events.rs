//! Structured trace emission for the watcher pipeline.

use posinfo_core_types::{DialogId, DialogKind};
use tracing::debug;

pub(crate) fn emit_resolution(dialog: DialogId, kind: DialogKind, strategy: &str, id: u64) {
    debug!(
        target: "posinfo.perceiver",
        dialog = %dialog.0,
        ?kind,
        strategy,
        id,
        "dialog resolved"
    );
}

pub(crate) fn emit_mount(dialog: DialogId, id: u64, corrective: bool) {
    debug!(
        target: "posinfo.perceiver",
        dialog = %dialog.0,
        id,
        corrective,
        "fragment mounted"
    );
}

pub(crate) fn emit_skip(dialog: DialogId, reason: &str) {
    debug!(
        target: "posinfo.perceiver",
        dialog = %dialog.0,
        reason,
        "dialog skipped"
    );
}
