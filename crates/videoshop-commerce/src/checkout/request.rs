//! Order payload sent to the order-intake service.

use crate::cart::{Cart, CartLine};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The payload that finalizes a purchase.
///
/// Built from the cart at submission time and dropped after the attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_contact: String,
    /// Snapshot of the cart lines.
    pub items: Vec<CartLine>,
    /// Cart total in minor units.
    pub total_price: u64,
}

impl CheckoutRequest {
    /// Snapshot a cart together with validated contact fields.
    pub fn from_cart(
        customer_name: impl Into<String>,
        customer_contact: impl Into<String>,
        cart: &Cart,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_contact: customer_contact.into(),
            items: cart.lines().to_vec(),
            total_price: cart.total(),
        }
    }

    /// One line per item: "• title × qty = subtotal".
    pub fn summary_lines(&self, currency: Currency) -> Vec<String> {
        self.items
            .iter()
            .map(|line| {
                format!(
                    "\u{2022} {} \u{00d7} {} = {}",
                    line.item().title,
                    line.quantity(),
                    Money::new(line.subtotal(), currency)
                )
            })
            .collect()
    }

    /// Total as money.
    pub fn total(&self, currency: Currency) -> Money {
        Money::new(self.total_price, currency)
    }
}
