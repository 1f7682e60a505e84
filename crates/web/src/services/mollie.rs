//! Mollie payment gateway client.
//!
//! Handles:
//! - Hosted checkout creation with correlation metadata
//! - Authoritative payment re-fetch for webhook verification
//! - Webhook payload decoding

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Payment gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payment gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Payment gateway response missing {0}")]
    MalformedResponse(&'static str),
}

/// Payment lifecycle states reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Open,
    Pending,
    Authorized,
    Paid,
    Canceled,
    Expired,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Terminal states that will never become `paid`.
    pub fn is_terminal_non_paid(&self) -> bool {
        matches!(self, Self::Canceled | Self::Expired | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

/// Correlation metadata attached at checkout and read back on confirmation.
///
/// The gateway stores metadata values as strings, so the plan travels as its
/// string name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMetadata {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub plan: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount: Decimal,
    pub description: String,
    pub redirect_url: String,
    pub webhook_url: String,
    pub metadata: PaymentMetadata,
}

/// A created payment with its hosted checkout URL.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub payment_id: String,
    pub checkout_url: String,
}

/// Authoritative payment state fetched from the gateway.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: String,
    pub status: PaymentStatus,
    pub metadata: Option<PaymentMetadata>,
    pub customer_id: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment(&self, req: &CheckoutRequest) -> Result<CheckoutSession, GatewayError>;

    /// Fetch the payment by id. Webhook processing always goes through this
    /// instead of trusting anything in the webhook body.
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, GatewayError>;
}

/// Mollie v2 API client.
#[derive(Clone)]
pub struct MollieClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MollieClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.mollie.com/v2".to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Serialize)]
struct MollieAmount {
    currency: &'static str,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentBody<'a> {
    amount: MollieAmount,
    description: &'a str,
    redirect_url: &'a str,
    webhook_url: &'a str,
    metadata: &'a PaymentMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MolliePayment {
    id: String,
    status: PaymentStatus,
    #[serde(default)]
    metadata: Option<PaymentMetadata>,
    #[serde(default)]
    customer_id: Option<String>,
    #[serde(rename = "_links", default)]
    links: MollieLinks,
}

#[derive(Deserialize, Default)]
struct MollieLinks {
    #[serde(default)]
    checkout: Option<MollieLink>,
}

#[derive(Deserialize)]
struct MollieLink {
    href: String,
}

#[async_trait]
impl PaymentGateway for MollieClient {
    async fn create_payment(&self, req: &CheckoutRequest) -> Result<CheckoutSession, GatewayError> {
        let body = CreatePaymentBody {
            amount: MollieAmount {
                currency: "EUR",
                value: req.amount.to_string(),
            },
            description: &req.description,
            redirect_url: &req.redirect_url,
            webhook_url: &req.webhook_url,
            metadata: &req.metadata,
        };

        let response = self
            .http
            .post(format!("{}/payments", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let payment: MolliePayment = self.check_response(response).await?.json().await?;

        let checkout_url = payment
            .links
            .checkout
            .map(|link| link.href)
            .ok_or(GatewayError::MalformedResponse("checkout link"))?;

        Ok(CheckoutSession {
            payment_id: payment.id,
            checkout_url,
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, GatewayError> {
        let response = self
            .http
            .get(format!("{}/payments/{}", self.base_url, payment_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let payment: MolliePayment = self.check_response(response).await?.json().await?;

        Ok(Payment {
            id: payment.id,
            status: payment.status,
            metadata: payment.metadata,
            customer_id: payment.customer_id,
        })
    }
}

/// Webhook body: the gateway reports only the payment id; everything else is
/// re-fetched.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub id: String,
}

/// Decode a webhook body, requiring a non-empty `id`.
///
/// Mollie posts `id=tr_xxx` form-encoded; JSON bodies are accepted as well.
pub fn decode_webhook_payload(body: &str) -> Option<WebhookPayload> {
    let payload: WebhookPayload = serde_urlencoded::from_str(body)
        .ok()
        .or_else(|| serde_json::from_str(body).ok())?;

    if payload.id.trim().is_empty() {
        return None;
    }

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_form_encoded_webhook() {
        let payload = decode_webhook_payload("id=tr_WDqYK6vllg").unwrap();
        assert_eq!(payload.id, "tr_WDqYK6vllg");
    }

    #[test]
    fn decodes_json_webhook() {
        let payload = decode_webhook_payload(r#"{"id":"tr_WDqYK6vllg"}"#).unwrap();
        assert_eq!(payload.id, "tr_WDqYK6vllg");
    }

    #[test]
    fn rejects_missing_or_empty_id() {
        assert!(decode_webhook_payload("").is_none());
        assert!(decode_webhook_payload("id=").is_none());
        assert!(decode_webhook_payload("foo=bar").is_none());
        assert!(decode_webhook_payload(r#"{"id":"  "}"#).is_none());
        assert!(decode_webhook_payload(r#"{"status":"paid"}"#).is_none());
    }

    #[test]
    fn payment_status_deserializes_from_gateway_strings() {
        let status: PaymentStatus = serde_json::from_str(r#""paid""#).unwrap();
        assert_eq!(status, PaymentStatus::Paid);

        let status: PaymentStatus = serde_json::from_str(r#""chargeback""#).unwrap();
        assert_eq!(status, PaymentStatus::Unknown);
    }

    #[test]
    fn terminal_non_paid_states() {
        assert!(PaymentStatus::Canceled.is_terminal_non_paid());
        assert!(PaymentStatus::Expired.is_terminal_non_paid());
        assert!(PaymentStatus::Failed.is_terminal_non_paid());
        assert!(!PaymentStatus::Paid.is_terminal_non_paid());
        assert!(!PaymentStatus::Open.is_terminal_non_paid());
    }

    #[test]
    fn checkout_response_parses_mollie_shape() {
        let raw = r#"{
            "id": "tr_WDqYK6vllg",
            "status": "open",
            "metadata": {"userId": "user-1", "plan": "Pro"},
            "_links": {"checkout": {"href": "https://www.mollie.com/checkout/select-method/WDqYK6vllg"}}
        }"#;

        let payment: MolliePayment = serde_json::from_str(raw).unwrap();
        assert_eq!(payment.id, "tr_WDqYK6vllg");
        assert_eq!(payment.status, PaymentStatus::Open);
        assert_eq!(payment.metadata.unwrap().plan, "Pro");
        assert_eq!(
            payment.links.checkout.unwrap().href,
            "https://www.mollie.com/checkout/select-method/WDqYK6vllg"
        );
    }
}
