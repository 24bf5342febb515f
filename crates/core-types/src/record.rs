//! Product record model matching the host's cart/enrichment wire shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::wire;

/// A single product as observed on the wire or synthesized from display
/// text. `id == 0` together with `from_dom == true` marks a placeholder
/// that carries no enrichment data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "wire::u64_from_any")]
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_display: Option<String>,
    /// May contain an HTML-encoded multiplication sign.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions_display: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_attributes: Vec<ProductAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_rules: Vec<PriceRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::opt_f64_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_meta: IndexMap<String, CustomMeta>,
    /// Wire value 0 means "no parent"; see [`ProductRecord::is_variant`].
    #[serde(
        default,
        deserialize_with = "wire::opt_u64_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<u64>,
    /// Embedded parent record on cart items when the product is a variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_product: Option<Box<ProductRecord>>,
    /// True when synthesized from dialog text only. Never on the wire.
    #[serde(skip)]
    pub from_dom: bool,
}

impl ProductRecord {
    /// Minimal record used when no enrichment data could be found.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            from_dom: true,
            ..Self::default()
        }
    }

    /// A record is a variant only when it points at a real parent.
    pub fn is_variant(&self) -> bool {
        self.parent_id.map_or(false, |p| p != 0)
    }

    pub fn stock(&self) -> Option<StockInfo> {
        if self.qty.is_none() && self.stock_status.is_none() {
            return None;
        }
        Some(StockInfo {
            qty: self.qty,
            status: self.stock_status.clone(),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub name: String,
    pub value: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

/// Tiered price entry; the host sends quantities and prices as numbers or
/// quoted strings depending on its serializer mood.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRule {
    #[serde(default, deserialize_with = "wire::u32_from_any")]
    pub min_qty: u32,
    #[serde(default, deserialize_with = "wire::f64_from_any")]
    pub price: f64,
}

/// Category entries arrive either as term objects or bare name strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Term {
        #[serde(default, deserialize_with = "wire::opt_u64_from_any")]
        id: Option<u64>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        slug: Option<String>,
    },
    Name(String),
}

impl CategoryEntry {
    pub fn label(&self) -> &str {
        match self {
            CategoryEntry::Term { name, title, .. } => name
                .as_deref()
                .or(title.as_deref())
                .unwrap_or_default(),
            CategoryEntry::Name(s) => s,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomMeta {
    #[serde(default)]
    pub label: Option<String>,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StockInfo {
    pub qty: Option<f64>,
    pub status: Option<String>,
}
