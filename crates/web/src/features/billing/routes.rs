use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{create_payment, payment_success, payment_webhook};
use crate::state::AppState;

/// Gateway-facing routes; authenticated by payment-id lookup, not sessions.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/payment/success", get(payment_success))
        .route("/payment/webhook", post(payment_webhook))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/create-payment", post(create_payment))
}
