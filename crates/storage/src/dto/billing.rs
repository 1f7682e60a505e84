use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Checkout-initiation request body.
///
/// The plan arrives as a raw string; the billing layer decides whether it
/// names a purchasable plan.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, max = 50))]
    pub plan: String,
}

/// Hosted checkout URL for the client to redirect to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub url: String,
}
