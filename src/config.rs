//! Overlay configuration loading: defaults, optional JSON file, then
//! `POSINFO_*` environment overrides, strongest last.

use std::path::Path;

use posinfo_core_types::OverlayConfig;
use tracing::debug;

use crate::errors::AppError;

pub fn load_overlay_config(path: Option<&Path>) -> Result<OverlayConfig, AppError> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| AppError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| AppError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => OverlayConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn apply_env_overrides(config: &mut OverlayConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides<F>(config: &mut OverlayConfig, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = get("POSINFO_MAX_DESCRIPTION_LENGTH") {
        if let Ok(value) = raw.parse() {
            config.max_description_length = value;
        } else {
            debug!(%raw, "ignoring unparsable POSINFO_MAX_DESCRIPTION_LENGTH");
        }
    }

    let toggles: [(&str, &mut bool); 13] = [
        ("POSINFO_SHOW_SHORT_DESCRIPTION", &mut config.show_short_description),
        ("POSINFO_SHOW_DESCRIPTION", &mut config.show_description),
        ("POSINFO_SHOW_TAGS", &mut config.show_tags),
        ("POSINFO_SHOW_BRAND", &mut config.show_brand),
        ("POSINFO_SHOW_WEIGHT", &mut config.show_weight),
        ("POSINFO_SHOW_DIMENSIONS", &mut config.show_dimensions),
        ("POSINFO_SHOW_ATTRIBUTES", &mut config.show_attributes),
        ("POSINFO_SHOW_SKU", &mut config.show_sku),
        ("POSINFO_SHOW_STOCK", &mut config.show_stock),
        ("POSINFO_SHOW_PRICE_RULES", &mut config.show_price_rules),
        ("POSINFO_SHOW_CATEGORIES", &mut config.show_categories),
        ("POSINFO_SHOW_BARCODE", &mut config.show_barcode),
        ("POSINFO_SHOW_VENDOR", &mut config.show_vendor),
    ];
    for (key, slot) in toggles {
        if let Some(raw) = get(key) {
            if let Some(value) = parse_bool(&raw) {
                *slot = value;
            }
        }
    }

    if let Some(value) = get("POSINFO_LABEL_SHOW_MORE") {
        config.labels.show_more = value;
    }
    if let Some(value) = get("POSINFO_LABEL_SHOW_LESS") {
        config.labels.show_less = value;
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
