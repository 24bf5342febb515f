//! Display-name recovery from dialog markup.
//!
//! Title regions interleave the product name with SKU, code and price
//! badges, and sometimes glue a numeric SKU straight onto the end of the
//! name. Extraction reads the title with the noise subtrees excluded, then
//! strips leftover label fragments textually.

use once_cell::sync::Lazy;
use regex::Regex;

use posinfo_core_types::DialogKind;

use crate::model::DomNode;

/// Heading region of a variant-selection popup.
pub const VARIANT_TITLE_CLASS: &str = "option-popup-title";
/// Title regions of simple item dialogs, in host markup vintage order.
pub const TITLE_CLASSES: [&str; 3] = ["item-title", "product-title", "product-name"];
/// Badge classes always excluded from title text.
pub const NOISE_CLASSES: [&str; 3] = ["item-code", "item-sku", "item-price"];
/// Class fragments that mark a badge regardless of its exact class name.
pub const NOISE_FRAGMENTS: [&str; 3] = ["code", "sku", "price"];
/// Last-resort title regions.
pub const FALLBACK_CLASSES: [&str; 2] = ["mat-dialog-title", "item-name"];
pub const FALLBACK_TAGS: [&str; 2] = ["h1", "h2"];

// A run of 5+ digits at the end of the text is a SKU glued onto the name.
static TRAILING_SKU: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5,}$").unwrap());
static CODE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(c[oó]digo|code):?\s*\d+").unwrap());
static SKU_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)sku:?\s*\d+").unwrap());
static PRICE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(precio|price):?\s*[\d.,]+").unwrap());

/// Best-effort product display name for the dialog, or None when no
/// candidate region yields non-empty text after cleaning.
pub fn extract_name(dialog: &DomNode, kind: DialogKind) -> Option<String> {
    if kind == DialogKind::VariantSelection {
        if let Some(heading) = dialog
            .find_class(VARIANT_TITLE_CLASS)
            .and_then(|region| region.find_tag("h1"))
        {
            let text = heading.text_content().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    if let Some(title) = dialog.find_any_class(&TITLE_CLASSES) {
        let raw = title.text_excluding(&is_noise);
        let cleaned = clean_title(&raw);
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }

    for class in FALLBACK_CLASSES {
        if let Some(el) = dialog.find_class(class) {
            let cleaned = strip_trailing_sku(&el.text_content());
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    for tag in FALLBACK_TAGS {
        if let Some(el) = dialog.find_tag(tag) {
            let cleaned = strip_trailing_sku(&el.text_content());
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }

    None
}

fn is_noise(node: &DomNode) -> bool {
    NOISE_CLASSES.iter().any(|c| node.has_class(c))
        || node
            .classes
            .iter()
            .any(|class| NOISE_FRAGMENTS.iter().any(|f| class.contains(f)))
}

fn clean_title(raw: &str) -> String {
    let text = strip_trailing_sku(raw);
    let text = CODE_LABEL.replace_all(&text, "");
    let text = SKU_LABEL.replace_all(&text, "");
    let text = PRICE_LABEL.replace_all(&text, "");
    text.trim().to_string()
}

fn strip_trailing_sku(raw: &str) -> String {
    TRAILING_SKU.replace(raw.trim(), "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_dialog(title: DomNode) -> DomNode {
        DomNode::new("div").with_child(DomNode::new("div").with_child(title))
    }

    #[test]
    fn variant_dialog_reads_popup_heading() {
        let dialog = DomNode::new("div")
            .with_child(DomNode::new("app-options"))
            .with_child(
                DomNode::new("div")
                    .with_class(VARIANT_TITLE_CLASS)
                    .with_child(DomNode::new("h1").with_text("  Polera Roja ")),
            );
        assert_eq!(
            extract_name(&dialog, DialogKind::VariantSelection).as_deref(),
            Some("Polera Roja")
        );
    }

    #[test]
    fn simple_dialog_excludes_badge_subtrees() {
        let title = DomNode::new("div")
            .with_class("item-title")
            .with_text("Arpillera 10oz")
            .with_child(DomNode::new("span").with_class("item-code").with_text("90210"))
            .with_child(DomNode::new("span").with_class("unit-price-tag").with_text("$1.990"));
        let dialog = simple_dialog(title);
        assert_eq!(
            extract_name(&dialog, DialogKind::Simple).as_deref(),
            Some("Arpillera 10oz")
        );
    }

    #[test]
    fn glued_trailing_sku_is_stripped() {
        let title = DomNode::new("div").with_class("item-title").with_text("Cinta48712345");
        let dialog = simple_dialog(title);
        assert_eq!(extract_name(&dialog, DialogKind::Simple).as_deref(), Some("Cinta"));
    }

    #[test]
    fn short_digit_runs_survive() {
        let title = DomNode::new("div").with_class("item-title").with_text("Arpillera 10oz");
        let dialog = simple_dialog(title);
        assert_eq!(
            extract_name(&dialog, DialogKind::Simple).as_deref(),
            Some("Arpillera 10oz")
        );
    }

    #[test]
    fn leftover_label_fragments_are_stripped() {
        let title = DomNode::new("div")
            .with_class("item-title")
            .with_text("Arpillera 10oz Código: 4821 Precio: 1.990");
        let dialog = simple_dialog(title);
        assert_eq!(
            extract_name(&dialog, DialogKind::Simple).as_deref(),
            Some("Arpillera 10oz")
        );
    }

    #[test]
    fn fallback_regions_apply_trailing_strip_only() {
        let dialog = DomNode::new("div")
            .with_child(DomNode::new("h2").with_text("Cinta Adhesiva 55501"));
        assert_eq!(
            extract_name(&dialog, DialogKind::Simple).as_deref(),
            Some("Cinta Adhesiva")
        );
    }

    #[test]
    fn empty_dialog_yields_none() {
        let dialog = DomNode::new("div").with_child(DomNode::new("div"));
        assert!(extract_name(&dialog, DialogKind::Simple).is_none());
    }
}
