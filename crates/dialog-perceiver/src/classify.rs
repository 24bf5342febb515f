//! Dialog classification: a dialog that embeds the host's variant-options
//! component is a variant-selection dialog, anything else is simple.

use posinfo_core_types::DialogKind;

use crate::model::DomNode;

/// Tag of the host component rendered inside variant-selection dialogs.
pub const VARIANT_OPTIONS_TAG: &str = "app-options";

pub fn classify(dialog: &DomNode) -> DialogKind {
    if dialog.find_tag(VARIANT_OPTIONS_TAG).is_some() {
        DialogKind::VariantSelection
    } else {
        DialogKind::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_with_options_component_is_variant_selection() {
        let dialog = DomNode::new("div")
            .with_child(DomNode::new("div").with_child(DomNode::new("app-options")));
        assert_eq!(classify(&dialog), DialogKind::VariantSelection);
    }

    #[test]
    fn plain_dialog_is_simple() {
        let dialog = DomNode::new("div").with_child(DomNode::new("div").with_class("item-title"));
        assert_eq!(classify(&dialog), DialogKind::Simple);
    }
}
