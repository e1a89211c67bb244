//! Catalog module.
//!
//! Contains the purchasable video lessons and the read-only catalog that
//! lists them.

mod catalog;
mod item;

pub use catalog::Catalog;
pub use item::CatalogItem;
