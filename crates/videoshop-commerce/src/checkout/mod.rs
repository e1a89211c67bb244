//! Checkout module.
//!
//! Contains the contact form, the order payload, the order-intake seam and
//! the submitter that ties them together.

mod contact;
mod intake;
mod request;
mod submitter;

pub use contact::ContactForm;
pub use intake::{OrderAck, OrderIntake};
pub use request::CheckoutRequest;
pub use submitter::{CheckoutSubmitter, SubmitState};
