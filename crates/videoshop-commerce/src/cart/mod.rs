//! Shopping cart module.
//!
//! Contains the cart, its line items and the derived summary.

mod cart;
mod summary;

pub use cart::{Cart, CartLine};
pub use summary::CartSummary;
