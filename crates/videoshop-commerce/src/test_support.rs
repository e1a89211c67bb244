//! In-memory order-intake fake shared by unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::checkout::{CheckoutRequest, OrderAck, OrderIntake};
use crate::error::SubmissionError;

pub(crate) struct FakeIntake {
    outcome: Mutex<Result<OrderAck, SubmissionError>>,
    requests: Mutex<Vec<CheckoutRequest>>,
    delay: Option<Duration>,
}

impl FakeIntake {
    pub(crate) fn accepting() -> Self {
        Self::with_outcome(Ok(OrderAck {
            success: true,
            message: Some("Order sent".to_string()),
        }))
    }

    pub(crate) fn failing(error: SubmissionError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<OrderAck, SubmissionError>) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set_outcome(&self, outcome: Result<OrderAck, SubmissionError>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub(crate) fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderIntake for FakeIntake {
    async fn submit_order(&self, request: &CheckoutRequest) -> Result<OrderAck, SubmissionError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.lock().unwrap().clone()
    }
}
