//! Integration tests for the payment webhook and public billing surface.
//!
//! The app is assembled with in-memory fakes and a lazy (never connected)
//! database pool, so none of these tests require Postgres or the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, NaiveDate, Utc};
use storage::Database;
use storage::error::StorageError;
use storage::models::Subscription;
use storage::services::analytics::{AnalyticsEngine, AnalyticsStore, CompletedSet};
use tower::ServiceExt;
use web::config::Config;
use web::features::billing::{BillingService, SubscriptionStore};
use web::router::create_router;
use web::services::mollie::{
    CheckoutRequest, CheckoutSession, GatewayError, Payment, PaymentGateway, PaymentMetadata,
    PaymentStatus,
};
use web::state::AppState;

struct NoAnalytics;

#[async_trait]
impl AnalyticsStore for NoAnalytics {
    async fn completed_sets_between(
        &self,
        _user_id: &str,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<Vec<CompletedSet>, StorageError> {
        Ok(Vec::new())
    }

    async fn completed_session_days(&self, _user_id: &str) -> Result<Vec<NaiveDate>, StorageError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct RecordingStore {
    updates: Mutex<Vec<(String, Subscription)>>,
}

#[async_trait]
impl SubscriptionStore for RecordingStore {
    async fn update_subscription(
        &self,
        user_id: &str,
        subscription: &Subscription,
        _customer_ref: Option<&str>,
    ) -> Result<(), StorageError> {
        self.updates
            .lock()
            .unwrap()
            .push((user_id.to_string(), *subscription));
        Ok(())
    }
}

#[derive(Default)]
struct FakeGateway {
    payments: HashMap<String, Payment>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment(&self, _req: &CheckoutRequest) -> Result<CheckoutSession, GatewayError> {
        Ok(CheckoutSession {
            payment_id: "tr_test".to_string(),
            checkout_url: "https://checkout.example/tr_test".to_string(),
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, GatewayError> {
        self.payments
            .get(payment_id)
            .cloned()
            .ok_or(GatewayError::Api {
                status: 404,
                message: "unknown payment".to_string(),
            })
    }
}

fn payment(id: &str, status: PaymentStatus, plan: &str) -> Payment {
    Payment {
        id: id.to_string(),
        status,
        metadata: Some(PaymentMetadata {
            user_id: "user-1".to_string(),
            plan: plan.to_string(),
        }),
        customer_id: None,
    }
}

fn offline_app(gateway: FakeGateway) -> (axum::Router, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    let config = Config::test_default();
    let db = Database::connect_lazy(&config.database_url).expect("lazy pool");
    let analytics = AnalyticsEngine::new(Arc::new(NoAnalytics));
    let billing = BillingService::new(
        store.clone(),
        Some(Arc::new(gateway) as Arc<dyn PaymentGateway>),
        config.public_base_url.clone(),
    );

    let state = AppState {
        config: Arc::new(config),
        db,
        analytics,
        billing,
    };

    (create_router(state), store)
}

fn webhook_request(body: &str, content_type: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/payment/webhook")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn paid_webhook_event_activates_subscription() {
    let mut gateway = FakeGateway::default();
    gateway
        .payments
        .insert("tr_1".to_string(), payment("tr_1", PaymentStatus::Paid, "Pro"));
    let (app, store) = offline_app(gateway);

    let response = app
        .oneshot(webhook_request("id=tr_1", "application/x-www-form-urlencoded"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"OK");

    let updates = store.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "user-1");
    assert!(matches!(updates[0].1, Subscription::ActivePro { .. }));
}

#[tokio::test]
async fn json_webhook_body_is_accepted() {
    let mut gateway = FakeGateway::default();
    gateway
        .payments
        .insert("tr_1".to_string(), payment("tr_1", PaymentStatus::Paid, "Jaar"));
    let (app, store) = offline_app(gateway);

    let response = app
        .oneshot(webhook_request(r#"{"id":"tr_1"}"#, "application/json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(matches!(
        store.updates.lock().unwrap()[0].1,
        Subscription::ActiveYear { .. }
    ));
}

#[tokio::test]
async fn webhook_without_payment_id_is_rejected() {
    let (app, store) = offline_app(FakeGateway::default());

    let response = app
        .oneshot(webhook_request("foo=bar", "application/x-www-form-urlencoded"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn canceled_payment_never_mutates_subscription() {
    let mut gateway = FakeGateway::default();
    gateway.payments.insert(
        "tr_1".to_string(),
        payment("tr_1", PaymentStatus::Canceled, "Pro"),
    );
    let (app, store) = offline_app(gateway);

    let response = app
        .oneshot(webhook_request("id=tr_1", "application/x-www-form-urlencoded"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn gateway_failure_surfaces_as_processing_error() {
    // No payment registered, so the authoritative re-fetch fails.
    let (app, store) = offline_app(FakeGateway::default());

    let response = app
        .oneshot(webhook_request("id=tr_unknown", "application/x-www-form-urlencoded"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn payment_success_redirects_into_the_app() {
    let (app, _) = offline_app(FakeGateway::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/payment/success?plan=Pro")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/?payment=success&plan=Pro"
    );
}

#[tokio::test]
async fn analytics_requires_a_session() {
    let (app, _) = offline_app(FakeGateway::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/analytics/streak")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn checkout_requires_a_session() {
    let (app, store) = offline_app(FakeGateway::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create-payment")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"plan":"Pro"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (app, _) = offline_app(FakeGateway::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
