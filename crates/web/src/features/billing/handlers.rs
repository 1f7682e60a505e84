use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use storage::dto::billing::{CheckoutResponse, CreatePaymentRequest};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;
use crate::services::mollie::decode_webhook_payload;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/create-payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Hosted checkout URL", body = CheckoutResponse),
        (status = 400, description = "Invalid plan"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "billing"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let url = state.billing.create_checkout(&user.user_id, &req.plan).await?;

    Ok(Json(CheckoutResponse { url }).into_response())
}

#[derive(Debug, Deserialize)]
pub struct PaymentSuccessQuery {
    pub plan: Option<String>,
}

#[utoipa::path(
    get,
    path = "/payment/success",
    params(
        ("plan" = Option<String>, Query, description = "Plan the payment was for")
    ),
    responses(
        (status = 303, description = "Redirect back into the app")
    ),
    tag = "billing"
)]
pub async fn payment_success(Query(query): Query<PaymentSuccessQuery>) -> Redirect {
    let plan = query.plan.unwrap_or_default();
    Redirect::to(&format!("/?payment=success&plan={plan}"))
}

#[utoipa::path(
    post,
    path = "/payment/webhook",
    responses(
        (status = 200, description = "Event processed or terminal non-paid"),
        (status = 400, description = "Payload carries no payment id"),
        (status = 500, description = "Processing failed, gateway should redeliver")
    ),
    tag = "billing"
)]
pub async fn payment_webhook(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, WebError> {
    let payload = decode_webhook_payload(&body)
        .ok_or_else(|| WebError::BadRequest("Missing payment id".to_string()))?;

    state.billing.handle_payment_event(&payload.id).await?;

    Ok("OK".into_response())
}
