//! Commerce error types.

use thiserror::Error;

use crate::ids::ItemId;

/// Errors that can occur in catalog and storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Item not found in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Two catalog entries share an id.
    #[error("Duplicate catalog item id: {0}")]
    DuplicateItemId(ItemId),

    /// Invalid catalog or configuration data.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Checkout dialog cannot be opened.
    #[error("Checkout unavailable: {0}")]
    CheckoutUnavailable(String),
}

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    CustomerName,
    CustomerContact,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::CustomerName => "customer name",
            ContactField::CustomerContact => "customer contact",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout input rejected before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required contact field is blank.
    #[error("{0} is required")]
    MissingField(ContactField),

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// The order-intake collaborator did not accept the order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Endpoint answered outside the success range.
    #[error("order rejected with status {status}")]
    Rejected {
        status: u16,
        /// Message from an `{"error": ...}` body, if any.
        message: Option<String>,
    },

    /// No answer within the configured deadline.
    #[error("order submission timed out")]
    Timeout,

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors returned by a checkout submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Another submission is still in flight.
    #[error("A checkout submission is already in progress")]
    AlreadyPending,
}

impl CheckoutError {
    /// Message shown to the customer. Submission failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Validation(ValidationError::MissingField(_)) => {
                "Please fill in your name and contact details.".to_string()
            }
            CheckoutError::Validation(ValidationError::EmptyCart) => {
                "Your cart is empty.".to_string()
            }
            CheckoutError::Submission(_) => {
                "We could not place your order. Please try again.".to_string()
            }
            CheckoutError::AlreadyPending => "Your order is being sent, please wait.".to_string(),
        }
    }
}
