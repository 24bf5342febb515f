//! Info-fragment rendering.
//!
//! Pure record-to-fragment construction: no surface access, no clocks.
//! The watcher decides when and where a fragment is mounted; `to_html`
//! exists for hosts that consume markup instead of the structured rows.

use std::collections::HashSet;

use posinfo_core_types::{
    normalize, CategoryEntry, DialogKind, Labels, OverlayConfig, PriceRule, ProductRecord,
};
use serde::{Deserialize, Serialize};

/// Stable element id of the mounted fragment inside a dialog.
pub const INFO_BOX_ID: &str = "oppi-box";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InfoFragment {
    pub product_id: u64,
    pub compact: bool,
    pub rows: Vec<Row>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Row {
    pub label: String,
    pub value: RowValue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RowValue {
    Text(String),
    Emphasis(String),
    /// Long text with a show-more toggle; `short` is the truncated form.
    Toggle {
        short: String,
        full: String,
    },
    Mono(String),
    Tags(Vec<String>),
    Attributes(Vec<(String, String)>),
    PriceTiers(Vec<PriceTier>),
    Stock {
        display: String,
        in_stock: bool,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceTier {
    pub qty_label: String,
    pub price_label: String,
}

/// Build the fragment for a record, or None when every section is gated
/// off or empty. Compact mode (variant dialogs) drops the bulkier
/// sections so the fragment fits above the variant grid.
pub fn render(
    record: &ProductRecord,
    kind: DialogKind,
    config: &OverlayConfig,
) -> Option<InfoFragment> {
    let compact = kind == DialogKind::VariantSelection;
    let mut rows = Vec::new();

    let short = record
        .short_description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if config.show_short_description {
        if let Some(short) = short {
            rows.push(Row {
                label: String::new(),
                value: RowValue::Emphasis(short.to_string()),
            });
        }
    }

    if config.show_description {
        if let Some(full) = record.description.as_deref().map(str::trim) {
            let duplicate = short.map_or(false, |s| normalize(s) == normalize(full));
            if !full.is_empty() && !duplicate {
                rows.push(Row {
                    label: String::new(),
                    value: description_value(full, config.max_description_length),
                });
            }
        }
    }

    if config.show_tags {
        if let Some(tags) = record.tags_string.as_deref() {
            let tags: Vec<String> = tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if !tags.is_empty() {
                rows.push(Row {
                    label: "TAGS".into(),
                    value: RowValue::Tags(tags),
                });
            }
        }
    }

    if config.show_brand {
        push_text(&mut rows, "BRAND", record.brand.as_deref());
    }

    if !compact {
        if config.show_weight {
            push_text(&mut rows, "WEIGHT", record.weight_display.as_deref());
        }
        if config.show_dimensions {
            if let Some(dims) = record.dimensions_display.as_deref() {
                let decoded = decode_entities(dims);
                if dimensions_valid(&decoded) {
                    rows.push(Row {
                        label: "DIMENSIONS".into(),
                        value: RowValue::Text(decoded.trim().to_string()),
                    });
                }
            }
        }
        if config.show_attributes {
            let attrs: Vec<(String, String)> = record
                .product_attributes
                .iter()
                .filter(|a| a.visible && !a.value.trim().is_empty())
                .map(|a| (a.name.clone(), a.value.trim().to_string()))
                .collect();
            if !attrs.is_empty() {
                rows.push(Row {
                    label: "ATTRIBUTES".into(),
                    value: RowValue::Attributes(attrs),
                });
            }
        }
    }

    if config.show_sku {
        if let Some(sku) = record.sku.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            rows.push(Row {
                label: "SKU".into(),
                value: RowValue::Mono(sku.to_string()),
            });
        }
    }

    if config.show_price_rules {
        let tiers = price_tiers(&record.price_rules);
        if !tiers.is_empty() {
            rows.push(Row {
                label: "PRICING".into(),
                value: RowValue::PriceTiers(tiers),
            });
        }
    }

    if config.show_categories {
        let labels: Vec<String> = record
            .categories
            .iter()
            .map(CategoryEntry::label)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if !labels.is_empty() {
            rows.push(Row {
                label: "CATEGORIES".into(),
                value: RowValue::Tags(labels),
            });
        }
    }

    if config.show_barcode {
        if let Some(code) = record.barcode.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            rows.push(Row {
                label: "BARCODE".into(),
                value: RowValue::Mono(code.to_string()),
            });
        }
    }

    if config.show_vendor {
        push_text(&mut rows, "VENDOR", record.vendor.as_deref());
    }

    if config.show_stock {
        if let Some(stock) = record.stock() {
            let (display, in_stock) = match stock.qty {
                Some(qty) => (format!("{} units", format_qty(qty)), qty > 0.0),
                None => stock_status_display(stock.status.as_deref().unwrap_or("")),
            };
            if !display.is_empty() {
                rows.push(Row {
                    label: "STOCK".into(),
                    value: RowValue::Stock { display, in_stock },
                });
            }
        }
    }

    for (key, meta) in &record.custom_meta {
        let value = meta.value.trim();
        if value.is_empty() {
            continue;
        }
        let label = meta
            .label
            .clone()
            .unwrap_or_else(|| titlecase_key(key))
            .to_uppercase();
        rows.push(Row {
            label,
            value: RowValue::Text(value.to_string()),
        });
    }

    if rows.is_empty() {
        return None;
    }
    Some(InfoFragment {
        product_id: record.id,
        compact,
        rows,
    })
}

fn push_text(rows: &mut Vec<Row>, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        rows.push(Row {
            label: label.into(),
            value: RowValue::Text(value.to_string()),
        });
    }
}

fn description_value(full: &str, max_chars: usize) -> RowValue {
    if full.chars().count() <= max_chars {
        return RowValue::Text(full.to_string());
    }
    let mut short: String = full.chars().take(max_chars).collect();
    short = short.trim_end().to_string();
    short.push('…');
    RowValue::Toggle {
        short,
        full: full.to_string(),
    }
}

/// Deduplicate by (min_qty, price) across the whole list, sort by
/// min_qty, label tier ranges against the next tier's threshold with an
/// open-ended last tier.
fn price_tiers(rules: &[PriceRule]) -> Vec<PriceTier> {
    let mut seen = HashSet::new();
    let mut rules: Vec<&PriceRule> = rules
        .iter()
        .filter(|r| seen.insert((r.min_qty, r.price.to_bits())))
        .collect();
    rules.sort_by_key(|r| r.min_qty);

    let mut tiers = Vec::with_capacity(rules.len());
    for (i, rule) in rules.iter().enumerate() {
        let qty_label = match rules.get(i + 1) {
            Some(next) if next.min_qty > rule.min_qty + 1 => {
                format!("{}-{}", rule.min_qty, next.min_qty - 1)
            }
            Some(_) => format!("{}", rule.min_qty),
            None => format!("{}+", rule.min_qty),
        };
        tiers.push(PriceTier {
            qty_label,
            price_label: format_price(rule.price),
        });
    }
    tiers
}

fn format_price(price: f64) -> String {
    if price.fract().abs() < f64::EPSILON {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

fn format_qty(qty: f64) -> String {
    if qty.fract().abs() < f64::EPSILON {
        format!("{:.0}", qty)
    } else {
        format!("{}", qty)
    }
}

fn stock_status_display(status: &str) -> (String, bool) {
    match status {
        "instock" => ("In stock".to_string(), true),
        "outofstock" => ("Out of stock".to_string(), false),
        "onbackorder" => ("On backorder".to_string(), false),
        other => (other.trim().to_string(), false),
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&times;", "×")
        .replace("&#215;", "×")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// A dimensions display counts only when it carries digits or letters;
/// the store emits `N/D`, `N/A` or bare separator strings for unset ones.
fn dimensions_valid(decoded: &str) -> bool {
    let trimmed = decoded.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("n/d")
        || trimmed.eq_ignore_ascii_case("n/a")
    {
        return false;
    }
    trimmed
        .chars()
        .any(|c| c.is_ascii_digit() || (c.is_alphabetic() && c != 'x' && c != 'X'))
}

fn titlecase_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl InfoFragment {
    /// Markup for hosts that mount raw HTML. All dynamic text is escaped.
    pub fn to_html(&self, labels: &Labels) -> String {
        let mut out = String::new();
        let compact = if self.compact { " oppi-compact" } else { "" };
        out.push_str(&format!(
            "<div id=\"{}\" class=\"oppi-box{}\" data-product-id=\"{}\">",
            INFO_BOX_ID, compact, self.product_id
        ));
        for row in &self.rows {
            out.push_str("<div class=\"oppi-row\">");
            if !row.label.is_empty() {
                out.push_str(&format!(
                    "<span class=\"oppi-label\">{}</span>",
                    escape(&row.label)
                ));
            }
            match &row.value {
                RowValue::Text(text) => {
                    out.push_str(&format!("<span class=\"oppi-value\">{}</span>", escape(text)));
                }
                RowValue::Emphasis(text) => {
                    out.push_str(&format!(
                        "<span class=\"oppi-value oppi-em\">{}</span>",
                        escape(text)
                    ));
                }
                RowValue::Toggle { short, full } => {
                    out.push_str(&format!(
                        "<span class=\"oppi-value oppi-desc\">\
                         <span class=\"oppi-desc-short\">{}</span>\
                         <span class=\"oppi-desc-full\" hidden>{}</span>\
                         <a class=\"oppi-toggle\" data-more=\"{}\" data-less=\"{}\">{}</a>\
                         </span>",
                        escape(short),
                        escape(full),
                        escape(&labels.show_more),
                        escape(&labels.show_less),
                        escape(&labels.show_more)
                    ));
                }
                RowValue::Mono(text) => {
                    out.push_str(&format!(
                        "<span class=\"oppi-value oppi-mono\">{}</span>",
                        escape(text)
                    ));
                }
                RowValue::Tags(tags) => {
                    out.push_str("<span class=\"oppi-value\">");
                    for tag in tags {
                        out.push_str(&format!("<span class=\"oppi-tag\">{}</span>", escape(tag)));
                    }
                    out.push_str("</span>");
                }
                RowValue::Attributes(attrs) => {
                    out.push_str("<span class=\"oppi-value\">");
                    for (name, value) in attrs {
                        out.push_str(&format!(
                            "<span class=\"oppi-attr\">{}: {}</span>",
                            escape(name),
                            escape(value)
                        ));
                    }
                    out.push_str("</span>");
                }
                RowValue::PriceTiers(tiers) => {
                    out.push_str("<table class=\"oppi-tiers\">");
                    for tier in tiers {
                        out.push_str(&format!(
                            "<tr><td>{}</td><td>{}</td></tr>",
                            escape(&tier.qty_label),
                            escape(&tier.price_label)
                        ));
                    }
                    out.push_str("</table>");
                }
                RowValue::Stock { display, in_stock } => {
                    let class = if *in_stock { "oppi-stock-in" } else { "oppi-stock-out" };
                    out.push_str(&format!(
                        "<span class=\"oppi-value {}\">{}</span>",
                        class,
                        escape(display)
                    ));
                }
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use posinfo_core_types::{CustomMeta, ProductAttribute};

    fn full_record() -> ProductRecord {
        ProductRecord {
            id: 42,
            name: "Arpillera Natural 10oz".into(),
            short_description: Some("Jute fabric, natural tone.".into()),
            description: Some("Long-form description ".repeat(12)),
            tags_string: Some("fabric, natural, , jute".into()),
            brand: Some("TexLan".into()),
            weight_display: Some("0.4 kg".into()),
            dimensions_display: Some("100 &times; 150 cm".into()),
            product_attributes: vec![
                ProductAttribute {
                    name: "Material".into(),
                    value: "Jute".into(),
                    visible: true,
                },
                ProductAttribute {
                    name: "Internal".into(),
                    value: "x9".into(),
                    visible: false,
                },
            ],
            price_rules: vec![
                PriceRule { min_qty: 10, price: 1500.0 },
                PriceRule { min_qty: 1, price: 1990.0 },
                PriceRule { min_qty: 10, price: 1500.0 },
            ],
            ..ProductRecord::default()
        }
    }

    #[test]
    fn full_record_renders_expected_sections() {
        let fragment = render(&full_record(), DialogKind::Simple, &OverlayConfig::default())
            .expect("sections present");
        assert_eq!(fragment.product_id, 42);
        assert!(!fragment.compact);
        let labels: Vec<&str> = fragment.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            ["", "", "TAGS", "BRAND", "WEIGHT", "DIMENSIONS", "ATTRIBUTES", "PRICING"]
        );
    }

    #[test]
    fn compact_mode_drops_bulky_sections() {
        let fragment = render(
            &full_record(),
            DialogKind::VariantSelection,
            &OverlayConfig::default(),
        )
        .expect("sections present");
        assert!(fragment.compact);
        let labels: Vec<&str> = fragment.rows.iter().map(|r| r.label.as_str()).collect();
        assert!(!labels.contains(&"WEIGHT"));
        assert!(!labels.contains(&"DIMENSIONS"));
        assert!(!labels.contains(&"ATTRIBUTES"));
        assert!(labels.contains(&"PRICING"));
    }

    #[test]
    fn long_description_gets_a_toggle() {
        let fragment = render(&full_record(), DialogKind::Simple, &OverlayConfig::default())
            .expect("sections present");
        let toggle = fragment
            .rows
            .iter()
            .find_map(|r| match &r.value {
                RowValue::Toggle { short, full } => Some((short.clone(), full.clone())),
                _ => None,
            })
            .expect("description exceeds the limit");
        assert!(toggle.0.chars().count() <= 151);
        assert!(toggle.0.ends_with('…'));
        assert!(toggle.1.chars().count() > 151);
    }

    #[test]
    fn description_equal_to_short_is_skipped() {
        let mut record = full_record();
        record.description = Some("  jute fabric,  natural tone. ".into());
        let fragment = render(&record, DialogKind::Simple, &OverlayConfig::default())
            .expect("sections present");
        let toggles = fragment
            .rows
            .iter()
            .filter(|r| matches!(r.value, RowValue::Toggle { .. } ))
            .count();
        assert_eq!(toggles, 0);
        // Only one description-ish row survives.
        assert_eq!(fragment.rows.iter().filter(|r| r.label.is_empty()).count(), 1);
    }

    #[test]
    fn price_tiers_dedup_sort_and_range() {
        let tiers = price_tiers(&full_record().price_rules);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].qty_label, "1-9");
        assert_eq!(tiers[0].price_label, "$1990");
        assert_eq!(tiers[1].qty_label, "10+");
        assert_eq!(tiers[1].price_label, "$1500");
    }

    #[test]
    fn interleaved_duplicate_rules_dedup_across_the_whole_list() {
        let tiers = price_tiers(&[
            PriceRule { min_qty: 5, price: 100.0 },
            PriceRule { min_qty: 5, price: 200.0 },
            PriceRule { min_qty: 5, price: 100.0 },
        ]);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].qty_label, "5");
        assert_eq!(tiers[0].price_label, "$100");
        assert_eq!(tiers[1].qty_label, "5+");
        assert_eq!(tiers[1].price_label, "$200");
    }

    #[test]
    fn adjacent_tier_renders_single_qty() {
        let tiers = price_tiers(&[
            PriceRule { min_qty: 1, price: 100.0 },
            PriceRule { min_qty: 2, price: 90.0 },
        ]);
        assert_eq!(tiers[0].qty_label, "1");
        assert_eq!(tiers[1].qty_label, "2+");
    }

    #[test]
    fn bogus_dimensions_are_skipped() {
        for bogus in ["", "  ", "N/D", "n/a", "× × ×", "x x", "&times;"] {
            let mut record = full_record();
            record.dimensions_display = Some(bogus.into());
            let fragment = render(&record, DialogKind::Simple, &OverlayConfig::default())
                .expect("other sections present");
            assert!(
                !fragment.rows.iter().any(|r| r.label == "DIMENSIONS"),
                "dimensions {bogus:?} should be skipped"
            );
        }
    }

    #[test]
    fn dimensions_entities_are_decoded() {
        let fragment = render(&full_record(), DialogKind::Simple, &OverlayConfig::default())
            .expect("sections present");
        let dims = fragment
            .rows
            .iter()
            .find(|r| r.label == "DIMENSIONS")
            .expect("valid dimensions");
        assert!(matches!(&dims.value, RowValue::Text(t) if t == "100 × 150 cm"));
    }

    #[test]
    fn hidden_attributes_never_render() {
        let fragment = render(&full_record(), DialogKind::Simple, &OverlayConfig::default())
            .expect("sections present");
        let attrs = fragment
            .rows
            .iter()
            .find_map(|r| match &r.value {
                RowValue::Attributes(a) => Some(a.clone()),
                _ => None,
            })
            .expect("visible attributes");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].0, "Material");
    }

    #[test]
    fn custom_meta_rows_titlecase_missing_labels() {
        let mut record = ProductRecord::default();
        record.id = 5;
        record.name = "Cinta".into();
        record.custom_meta.insert(
            "origin_country".into(),
            CustomMeta { label: None, value: "Chile".into() },
        );
        let config = OverlayConfig {
            show_short_description: false,
            show_description: false,
            show_tags: false,
            show_brand: false,
            show_weight: false,
            show_dimensions: false,
            show_attributes: false,
            show_price_rules: false,
            ..OverlayConfig::default()
        };
        let fragment = render(&record, DialogKind::Simple, &config).expect("meta row");
        assert_eq!(fragment.rows.len(), 1);
        assert_eq!(fragment.rows[0].label, "ORIGIN COUNTRY");
    }

    #[test]
    fn placeholder_record_renders_nothing() {
        let record = ProductRecord::placeholder("Arpillera 10oz");
        assert!(render(&record, DialogKind::Simple, &OverlayConfig::default()).is_none());
    }

    #[test]
    fn stock_qty_beats_status() {
        let mut record = ProductRecord::default();
        record.id = 7;
        record.name = "Cinta".into();
        record.qty = Some(12.0);
        record.stock_status = Some("outofstock".into());
        let config = OverlayConfig {
            show_stock: true,
            ..OverlayConfig::default()
        };
        let fragment = render(&record, DialogKind::Simple, &config).expect("stock row");
        let stock = fragment.rows.iter().find(|r| r.label == "STOCK").unwrap();
        assert!(matches!(
            &stock.value,
            RowValue::Stock { display, in_stock: true } if display == "12 units"
        ));
    }

    #[test]
    fn html_output_escapes_text() {
        let mut record = ProductRecord::default();
        record.id = 9;
        record.name = "Cinta".into();
        record.brand = Some("<b>&Co".into());
        let fragment = render(&record, DialogKind::Simple, &OverlayConfig::default())
            .expect("brand row");
        let html = fragment.to_html(&Labels::default());
        assert!(html.contains("data-product-id=\"9\""));
        assert!(html.contains("&lt;b&gt;&amp;Co"));
        assert!(!html.contains("<b>"));
    }
}
