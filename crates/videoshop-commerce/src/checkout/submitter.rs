//! Checkout submission with a single-flight pending guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cart::Cart;
use crate::checkout::{CheckoutRequest, ContactForm, OrderAck, OrderIntake};
use crate::error::{CheckoutError, ValidationError};

/// Whether a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitState {
    Idle,
    Pending,
}

impl SubmitState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitState::Pending)
    }
}

/// Sends carts to the order-intake service.
///
/// At most one submission is outstanding at a time. The pending flag is
/// released on every completion path, including a dropped future.
pub struct CheckoutSubmitter {
    intake: Arc<dyn OrderIntake>,
    pending: AtomicBool,
}

impl CheckoutSubmitter {
    /// Create a submitter over an order-intake service.
    pub fn new(intake: Arc<dyn OrderIntake>) -> Self {
        Self {
            intake,
            pending: AtomicBool::new(false),
        }
    }

    /// Current state.
    pub fn state(&self) -> SubmitState {
        if self.pending.load(Ordering::Acquire) {
            SubmitState::Pending
        } else {
            SubmitState::Idle
        }
    }

    /// Submit the cart with the form's contact details.
    ///
    /// Validation failures return before any network call and change
    /// nothing. On success the cart is emptied and the form reset (fields
    /// cleared, dialog closed). On submission failure cart and form are left
    /// exactly as they were.
    pub async fn submit(
        &self,
        form: &mut ContactForm,
        cart: &mut Cart,
    ) -> Result<OrderAck, CheckoutError> {
        let (name, contact) = form.validate()?;
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let _guard = PendingGuard::enter(&self.pending)?;

        let request = CheckoutRequest::from_cart(name, contact, cart);
        tracing::info!(
            lines = request.items.len(),
            total = request.total_price,
            "submitting order"
        );

        match self.intake.submit_order(&request).await {
            Ok(ack) => {
                tracing::info!(message = ?ack.message, "order accepted");
                cart.clear();
                form.reset();
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed");
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for CheckoutSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSubmitter")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Holds the pending flag for the lifetime of one submission.
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Result<Self, CheckoutError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CheckoutError::AlreadyPending)?;
        Ok(Self { flag })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
