//! Derived cart values for display.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Snapshot of the values derived from a cart.
///
/// Taken after each cart mutation and handed to the presentation layer;
/// never stored back into the cart.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    /// Distinct lines (the cart tab badge).
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: u64,
    /// Cart total in minor units.
    pub total: u64,
}

impl CartSummary {
    /// Total as money in the shop currency.
    pub fn total_money(&self, currency: Currency) -> Money {
        Money::new(self.total, currency)
    }

    /// Badge text for the cart tab, if any.
    pub fn badge(&self) -> Option<String> {
        (self.line_count > 0).then(|| self.line_count.to_string())
    }
}
