//! Order-intake client for the VideoShop storefront.
//!
//! This crate provides:
//! - `HttpOrderIntake` - POSTs checkout requests to the order endpoint
//! - `TimeoutConfig` - Connect and total deadlines for each submission

mod client;
mod timeout;

pub use client::*;
pub use timeout::*;
