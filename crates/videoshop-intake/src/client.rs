//! HTTP client for the order-intake endpoint.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Url};
use serde::Deserialize;
use videoshop_commerce::checkout::{CheckoutRequest, OrderAck, OrderIntake};
use videoshop_commerce::SubmissionError;

use crate::timeout::TimeoutConfig;

/// Error building an intake client.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Body of a non-success answer.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Sends checkout requests to an HTTP endpoint.
///
/// Each request is POSTed once as JSON. Any 2xx answer is an acceptance;
/// everything else, including transport failures and timeouts, is a
/// [`SubmissionError`]. No retries.
#[derive(Debug, Clone)]
pub struct HttpOrderIntake {
    client: Client,
    endpoint: Url,
    timeout: TimeoutConfig,
}

impl HttpOrderIntake {
    /// Create a client for an `http` or `https` endpoint.
    pub fn new(endpoint: &str, timeout: TimeoutConfig) -> Result<Self, IntakeError> {
        Self::with_builder(endpoint, timeout, Client::builder())
    }

    /// Create a client from a preconfigured builder (proxy, TLS roots).
    ///
    /// The timeouts always override the builder's own.
    pub fn with_builder(
        endpoint: &str,
        timeout: TimeoutConfig,
        builder: ClientBuilder,
    ) -> Result<Self, IntakeError> {
        let endpoint = Url::parse(endpoint).map_err(|e| IntakeError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(IntakeError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        let client = builder
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .user_agent(concat!("videoshop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IntakeError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The endpoint orders are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }
}

#[async_trait]
impl OrderIntake for HttpOrderIntake {
    async fn submit_order(&self, request: &CheckoutRequest) -> Result<OrderAck, SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, "posting order");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();

        if status.is_success() {
            // The order is accepted once a 2xx arrives; the body is optional
            // and a body that fails to arrive is a bare ack.
            let message = match response.bytes().await {
                Ok(body) => serde_json::from_slice::<OrderAck>(&body)
                    .ok()
                    .and_then(|ack| ack.message),
                Err(e) => {
                    tracing::warn!(status = status.as_u16(), error = %e, "order accepted but body unreadable");
                    None
                }
            };
            return Ok(OrderAck {
                success: true,
                message,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|b| b.error);
        tracing::warn!(status = status.as_u16(), error = ?message, "order endpoint rejected order");
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn classify(e: reqwest::Error) -> SubmissionError {
    if e.is_timeout() {
        SubmissionError::Timeout
    } else {
        SubmissionError::Transport(e.to_string())
    }
}
