//! Catalog product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// An immutable catalog record.
///
/// Serialized with camelCase field names so that persisted carts and orders
/// keep the storefront's on-disk layout (`inStock`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    /// Category tag, e.g. `phones` or `screenProtectors`.
    pub category: String,
    /// Brand tag, e.g. `apple` or `greenLion`.
    pub brand: String,
    /// Image URI.
    #[serde(default)]
    pub image: String,
    /// Available colors in display order. May be empty.
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Whether `color` is one of this product's colors.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// The color pre-selected on the product page (the first one listed).
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}
