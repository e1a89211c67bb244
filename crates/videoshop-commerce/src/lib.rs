//! Storefront domain types and logic for VideoShop.
//!
//! This crate provides the core of a small video-lesson storefront:
//!
//! - **Catalog**: Read-only list of purchasable lessons
//! - **Cart**: Line items with quantities and a derived total
//! - **Checkout**: Contact form, order payload, single-flight submitter
//! - **Storefront**: Session object that emits events for the UI
//!
//! # Example
//!
//! ```rust,ignore
//! use videoshop_commerce::prelude::*;
//!
//! let mut shop = Storefront::new(Catalog::builtin(), intake);
//! shop.add_to_cart(ItemId::new(1))?;
//! shop.add_to_cart(ItemId::new(1))?;
//! shop.add_to_cart(ItemId::new(2))?;
//! assert_eq!(shop.total(), 4597);
//!
//! shop.set_customer_name("Anna");
//! shop.set_customer_contact("@anna");
//! shop.checkout().await?;
//! ```

pub mod error;
pub mod events;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod profile;
pub mod storefront;
pub mod support;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{CheckoutError, CommerceError, ContactField, SubmissionError, ValidationError};
pub use ids::ItemId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CheckoutError, CommerceError, ContactField, SubmissionError, ValidationError};
    pub use crate::events::{Notification, NotificationLevel, StoreEvent};
    pub use crate::ids::ItemId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CatalogItem};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartSummary};

    // Checkout
    pub use crate::checkout::{
        CheckoutRequest, CheckoutSubmitter, ContactForm, OrderAck, OrderIntake, SubmitState,
    };

    // Session
    pub use crate::profile::PurchaseHistory;
    pub use crate::storefront::{Storefront, Tab};
    pub use crate::support::{ContactChannel, FaqEntry, SupportInfo};
}
