//! Checkout contact form.

use crate::error::{ContactField, ValidationError};
use serde::{Deserialize, Serialize};

/// Fields of the checkout dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
    /// Customer name as typed.
    pub customer_name: String,
    /// Phone, e-mail or messenger handle as typed.
    pub customer_contact: String,
    /// Whether the checkout dialog is shown.
    pub dialog_open: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn set_customer_contact(&mut self, contact: impl Into<String>) {
        self.customer_contact = contact.into();
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    /// Check both fields and return them trimmed.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let name = self.customer_name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField(ContactField::CustomerName));
        }
        let contact = self.customer_contact.trim();
        if contact.is_empty() {
            return Err(ValidationError::MissingField(ContactField::CustomerContact));
        }
        Ok((name.to_string(), contact.to_string()))
    }

    /// Clear the fields and close the dialog.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
