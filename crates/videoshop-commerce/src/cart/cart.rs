//! Cart and line item types.

use std::num::NonZeroU32;

use crate::cart::CartSummary;
use crate::catalog::CatalogItem;
use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Lines keep insertion order and there is at most one line per item id.
/// The total is derived from the lines on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of an item.
    ///
    /// Increments the existing line for `item.id`, or appends a new line with
    /// quantity 1. Returns the line's new quantity.
    pub fn add_item(&mut self, item: &CatalogItem) -> NonZeroU32 {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            existing.add_quantity(1);
            return existing.quantity;
        }

        self.lines.push(CartLine::new(item.clone()));
        NonZeroU32::MIN
    }

    /// Remove the line for an item.
    ///
    /// Absent ids are a no-op. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.item.id != id);
        self.lines.len() < len_before
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.subtotal()))
    }

    /// Merge another cart into this one.
    ///
    /// Quantities of shared items are summed; new items keep the other
    /// cart's order after this cart's lines.
    pub fn merge(&mut self, other: Cart) {
        for line in other.lines {
            if let Some(existing) = self.lines.iter_mut().find(|l| l.item.id == line.item.id) {
                existing.add_quantity(line.quantity.get());
            } else {
                self.lines.push(line);
            }
        }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for an item.
    pub fn get(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item.id == id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshot of the derived values.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.line_count(),
            item_count: self.item_count(),
            total: self.total(),
        }
    }
}

/// One catalog item plus the quantity selected.
///
/// Serializes flat, as the item's fields plus `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    #[serde(flatten)]
    item: CatalogItem,
    quantity: NonZeroU32,
}

impl CartLine {
    fn new(item: CatalogItem) -> Self {
        Self {
            item,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Saturates at `u32::MAX`; units past the cap are dropped with a warning.
    fn add_quantity(&mut self, units: u32) {
        let wanted = u64::from(self.quantity.get()) + u64::from(units);
        let cap = u64::from(u32::MAX);
        if wanted > cap {
            tracing::warn!(
                item_id = %self.item.id,
                dropped = wanted - cap,
                "cart quantity capped at u32::MAX"
            );
        }
        self.quantity = self.quantity.saturating_add(units);
    }

    /// The item on this line.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `unit_price * quantity`.
    pub fn subtotal(&self) -> u64 {
        self.item
            .unit_price
            .saturating_mul(u64::from(self.quantity.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn item(id: u64, price: u64) -> CatalogItem {
        CatalogItem::new(id, format!("Lesson {id}"), price, "1:00:00", "Tutorial", "")
    }

    fn expected_total(cart: &Cart) -> u64 {
        cart.lines()
            .iter()
            .map(|l| l.item().unit_price * u64::from(l.quantity()))
            .sum()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_add_twice_and_once() {
        let a = item(1, 1299);
        let b = item(2, 1999);
        let mut cart = Cart::new();

        cart.add_item(&a);
        cart.add_item(&a);
        cart.add_item(&b);

        let lines: Vec<(u64, u32)> = cart.lines().iter().map(|l| (l.id().get(), l.quantity())).collect();
        assert_eq!(lines, vec![(1, 2), (2, 1)]);
        assert_eq!(cart.total(), 4597);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let a = item(1, 1000);
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(&a).get(), 1);
        assert_eq!(cart.add_item(&a).get(), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_one_line_per_id_with_add_counts() {
        let catalog: Vec<CatalogItem> = (1..=4).map(|id| item(id, id * 100)).collect();
        let sequence = [0usize, 2, 0, 3, 3, 3, 1, 0, 2];
        let mut cart = Cart::new();
        let mut counts: HashMap<u64, u32> = HashMap::new();

        for idx in sequence {
            cart.add_item(&catalog[idx]);
            *counts.entry(catalog[idx].id.get()).or_default() += 1;
        }

        assert_eq!(cart.line_count(), counts.len());
        for line in cart.lines() {
            assert_eq!(line.quantity(), counts[&line.id().get()]);
        }
        // insertion order follows first add
        let order: Vec<u64> = cart.lines().iter().map(|l| l.id().get()).collect();
        assert_eq!(order, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_total_tracks_interleaved_mutations() {
        let a = item(1, 1299);
        let b = item(2, 1999);
        let c = item(3, 2499);
        let mut cart = Cart::new();

        cart.add_item(&a);
        cart.add_item(&b);
        assert_eq!(cart.total(), expected_total(&cart));
        cart.add_item(&c);
        cart.remove_item(b.id);
        assert_eq!(cart.total(), expected_total(&cart));
        cart.add_item(&a);
        cart.add_item(&b);
        assert_eq!(cart.total(), 1299 * 2 + 2499 + 1999);
        cart.remove_item(a.id);
        assert_eq!(cart.total(), expected_total(&cart));
        assert_eq!(cart.total(), 2499 + 1999);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1000));
        cart.add_item(&item(1, 1000));

        assert!(cart.remove_item(ItemId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut empty = Cart::new();
        assert!(!empty.remove_item(ItemId::new(999)));
        assert!(empty.is_empty());

        let mut cart = Cart::new();
        cart.add_item(&item(1, 1000));
        let before = cart.clone();
        assert!(!cart.remove_item(ItemId::new(999)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1000));
        cart.add_item(&item(2, 500));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_merge() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 100));
        cart.add_item(&item(2, 200));

        let mut other = Cart::new();
        other.add_item(&item(3, 300));
        other.add_item(&item(1, 100));
        other.add_item(&item(1, 100));

        cart.merge(other);

        let lines: Vec<(u64, u32)> = cart.lines().iter().map(|l| (l.id().get(), l.quantity())).collect();
        assert_eq!(lines, vec![(1, 3), (2, 1), (3, 1)]);
        assert_eq!(cart.total(), 300 + 200 + 300);
    }

    #[test]
    fn test_total_saturates() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, u64::MAX));
        cart.add_item(&item(1, u64::MAX));
        assert_eq!(cart.total(), u64::MAX);
    }

    #[test]
    fn test_quantity_caps_at_u32_max() {
        let lesson = item(1, 100);
        let mut cart = Cart::new();
        cart.add_item(&lesson);
        cart.lines[0].quantity = NonZeroU32::MAX;

        assert_eq!(cart.add_item(&lesson), NonZeroU32::MAX);

        let mut other = Cart::new();
        other.add_item(&lesson);
        other.add_item(&lesson);
        cart.merge(other);
        assert_eq!(cart.lines()[0].quantity(), u32::MAX);
        assert_eq!(cart.item_count(), u64::from(u32::MAX));
    }

    #[test]
    fn test_line_serializes_flat() {
        let mut cart = Cart::new();
        cart.add_item(&item(5, 1499));
        cart.add_item(&item(5, 1499));

        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["price"], 1499);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["title"], "Lesson 5");
    }

    #[test]
    fn test_line_rejects_zero_quantity() {
        let json = r#"{"id": 1, "title": "A", "price": 1, "duration": "", "category": "",
                       "thumbnail": "", "quantity": 0}"#;
        assert!(serde_json::from_str::<CartLine>(json).is_err());
    }
}
