//! Seam to the external order-intake service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutRequest;
use crate::error::SubmissionError;

/// Acknowledgment body returned on success.
///
/// The body is optional; an empty or unparseable body is treated as a bare
/// acknowledgment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An external service that accepts orders.
///
/// Implementations send each request exactly once and report any failure
/// (non-success status, timeout, transport) as a [`SubmissionError`].
#[async_trait]
pub trait OrderIntake: Send + Sync {
    async fn submit_order(&self, request: &CheckoutRequest) -> Result<OrderAck, SubmissionError>;
}
