//! Catalog item type.

use crate::ids::ItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A purchasable video lesson.
///
/// Items are reference data: the storefront reads them but never changes
/// them. Field names on the wire follow the storefront's order payload
/// (`price`, `thumbnail`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Lesson title.
    pub title: String,
    /// Price in minor currency units.
    #[serde(rename = "price")]
    pub unit_price: u64,
    /// Running time label (e.g. "2:30:00").
    pub duration: String,
    /// Category label shown as a badge.
    pub category: String,
    /// Thumbnail image URL.
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
}

impl CatalogItem {
    /// Create a new item.
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        unit_price: u64,
        duration: impl Into<String>,
        category: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            unit_price,
            duration: duration.into(),
            category: category.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }

    /// Unit price as money in the shop currency.
    pub fn price(&self, currency: Currency) -> Money {
        Money::new(self.unit_price, currency)
    }
}
