//! Purchase history shown on the profile tab.

use crate::catalog::CatalogItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Lessons the customer bought in earlier sessions.
///
/// Supplied as reference data; the storefront only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PurchaseHistory {
    purchases: Vec<CatalogItem>,
}

impl PurchaseHistory {
    pub fn new(purchases: Vec<CatalogItem>) -> Self {
        Self { purchases }
    }

    pub fn purchases(&self) -> &[CatalogItem] {
        &self.purchases
    }

    /// Number of purchased lessons.
    pub fn count(&self) -> usize {
        self.purchases.len()
    }

    /// Sum of the purchase prices.
    pub fn total_spent(&self) -> u64 {
        self.purchases
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.unit_price))
    }

    pub fn total_spent_money(&self, currency: Currency) -> Money {
        Money::new(self.total_spent(), currency)
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_totals() {
        let history = PurchaseHistory::new(vec![
            CatalogItem::new(101, "Composition Basics", 1199, "1:30:00", "Tutorial", ""),
            CatalogItem::new(102, "Lighting", 801, "0:50:00", "Tutorial", ""),
        ]);
        assert_eq!(history.count(), 2);
        assert_eq!(history.total_spent(), 2000);
        assert_eq!(history.total_spent_money(Currency::USD).display(), "$20.00");
    }

    #[test]
    fn test_empty_history() {
        let history = PurchaseHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.total_spent(), 0);
    }
}
