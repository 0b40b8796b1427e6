use async_trait::async_trait;
use log::{error, warn};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::PaymentsConfig;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gateway rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Gateway returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// One line of a hosted checkout session, priced in currency minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayLineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct CreateSessionRequest {
    pub line_items: Vec<GatewayLineItem>,
    pub success_url: String,
    pub cancel_url: String,
    /// Stable per-checkout key so a retried create never double-charges.
    pub idempotency_key: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// External payment collaborator. The production implementation talks to
/// the hosted checkout-session API; tests substitute a mock.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CheckoutSession, GatewayError>;
}

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 200;

pub struct HostedCheckoutGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Deserialize)]
struct SessionBody {
    id: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl HostedCheckoutGateway {
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.clone(),
        }
    }

    fn session_form(request: &CreateSessionRequest) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("payment_method_types[0]".into(), "card".into()),
            ("success_url".into(), request.success_url.clone()),
            ("cancel_url".into(), request.cancel_url.clone()),
        ];
        for (i, line) in request.line_items.iter().enumerate() {
            form.push((
                format!("line_items[{i}][price_data][currency]"),
                "usd".into(),
            ));
            form.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                line.name.clone(),
            ));
            form.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                line.unit_amount.to_string(),
            ));
            form.push((format!("line_items[{i}][quantity]"), line.quantity.to_string()));
        }
        form
    }

    async fn create_once(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", &request.idempotency_key)
            .form(&Self::session_form(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: SessionBody = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let url = body
            .url
            .ok_or_else(|| GatewayError::InvalidResponse("session has no url".to_string()))?;
        Ok(CheckoutSession { id: body.id, url })
    }
}

#[async_trait]
impl PaymentGateway for HostedCheckoutGateway {
    /// Bounded retry on transport errors only. Rejections are never
    /// retried; the idempotency key keeps a retried create from opening
    /// a second session.
    async fn create_checkout_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let mut attempt = 0;
        loop {
            match self.create_once(request).await {
                Ok(session) => return Ok(session),
                Err(GatewayError::Transport(e)) if attempt + 1 < RETRY_ATTEMPTS => {
                    attempt += 1;
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS << attempt);
                    warn!(
                        "create_checkout_session: transport error (attempt {}): {}, retrying in {:?}",
                        attempt, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!("create_checkout_session: giving up: {}", e);
                    return Err(e);
                }
            }
        }
    }
}
