//! Display configuration for the overlay, supplied by the host page before
//! the engine initializes. Missing object or fields fall back to defaults.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub max_description_length: usize,
    pub show_short_description: bool,
    pub show_description: bool,
    pub show_tags: bool,
    pub show_brand: bool,
    pub show_weight: bool,
    pub show_dimensions: bool,
    pub show_attributes: bool,
    pub show_sku: bool,
    pub show_stock: bool,
    pub show_price_rules: bool,
    pub show_categories: bool,
    pub show_barcode: bool,
    pub show_vendor: bool,
    pub labels: Labels,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_description_length: 150,
            show_short_description: true,
            show_description: true,
            show_tags: true,
            show_brand: true,
            show_weight: true,
            show_dimensions: true,
            show_attributes: true,
            show_sku: false,
            show_stock: false,
            show_price_rules: true,
            show_categories: false,
            show_barcode: false,
            show_vendor: false,
            labels: Labels::default(),
        }
    }
}

/// Localizable text for the long-description toggle link.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub show_more: String,
    pub show_less: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            show_more: "Show more".to_string(),
            show_less: "Show less".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = OverlayConfig::default();
        assert_eq!(config.max_description_length, 150);
        assert!(config.show_short_description);
        assert!(config.show_price_rules);
        assert!(!config.show_sku);
        assert!(!config.show_stock);
        assert!(!config.show_categories);
        assert!(!config.show_barcode);
        assert!(!config.show_vendor);
    }

    #[test]
    fn partial_object_falls_back_to_defaults() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{"show_sku": true, "max_description_length": 80}"#).unwrap();
        assert!(config.show_sku);
        assert_eq!(config.max_description_length, 80);
        assert!(config.show_tags);
        assert_eq!(config.labels.show_more, "Show more");
    }
}
