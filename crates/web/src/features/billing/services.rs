use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use storage::Database;
use storage::error::StorageError;
use storage::models::{Plan, Subscription};
use storage::repository::user::UserRepository;
use thiserror::Error;

use crate::error::WebError;
use crate::services::mollie::{
    CheckoutRequest, GatewayError, PaymentGateway, PaymentMetadata, PaymentStatus,
};

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Invalid plan selected")]
    InvalidPlan,

    #[error("Payment gateway credential is not configured")]
    NotConfigured,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Payment {0} carries no usable metadata")]
    MissingMetadata(String),

    #[error("Payment {payment_id} names plan {plan:?}, which cannot be activated")]
    UnknownPlan { payment_id: String, plan: String },
}

impl From<BillingError> for WebError {
    fn from(error: BillingError) -> Self {
        match error {
            BillingError::InvalidPlan => Self::BadRequest("Invalid plan selected".to_string()),
            BillingError::NotConfigured => {
                Self::Configuration("MOLLIE_API_KEY is not set".to_string())
            }
            BillingError::Gateway(e) => Self::Gateway(e.to_string()),
            BillingError::Storage(e) => Self::Storage(e),
            error @ (BillingError::MissingMetadata(_) | BillingError::UnknownPlan { .. }) => {
                Self::InternalServerError(error.to_string())
            }
        }
    }
}

/// Write interface for applying a confirmed subscription transition.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Replace the user's subscription fields in one atomic update.
    async fn update_subscription(
        &self,
        user_id: &str,
        subscription: &Subscription,
        customer_ref: Option<&str>,
    ) -> Result<(), StorageError>;
}

#[async_trait]
impl SubscriptionStore for Database {
    async fn update_subscription(
        &self,
        user_id: &str,
        subscription: &Subscription,
        customer_ref: Option<&str>,
    ) -> Result<(), StorageError> {
        UserRepository::new(self.pool())
            .update_subscription(user_id, subscription, customer_ref)
            .await
    }
}

/// Drives subscription transitions from checkout requests and payment
/// lifecycle events delivered by the gateway.
#[derive(Clone)]
pub struct BillingService {
    store: Arc<dyn SubscriptionStore>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    public_base_url: String,
}

impl BillingService {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        public_base_url: String,
    ) -> Self {
        Self {
            store,
            gateway,
            public_base_url,
        }
    }

    /// Request a hosted checkout URL for a paid plan.
    ///
    /// Mutates nothing: the subscription only changes once the gateway
    /// confirms the payment through the webhook. `Start` has no payment step
    /// and is rejected like any other non-purchasable selector.
    pub async fn create_checkout(
        &self,
        user_id: &str,
        raw_plan: &str,
    ) -> Result<String, BillingError> {
        let plan = Plan::parse(raw_plan).ok_or(BillingError::InvalidPlan)?;

        let (Some(amount), Some(description)) = (plan.price(), plan.checkout_description())
        else {
            return Err(BillingError::InvalidPlan);
        };

        let gateway = self.gateway.as_ref().ok_or(BillingError::NotConfigured)?;

        let request = CheckoutRequest {
            amount,
            description: description.to_string(),
            redirect_url: format!("{}/payment/success?plan={plan}", self.public_base_url),
            webhook_url: format!("{}/payment/webhook", self.public_base_url),
            metadata: PaymentMetadata {
                user_id: user_id.to_string(),
                plan: plan.as_str().to_string(),
            },
        };

        let session = gateway.create_payment(&request).await?;

        tracing::info!(
            user_id,
            plan = %plan,
            payment_id = %session.payment_id,
            "Created checkout session"
        );

        Ok(session.checkout_url)
    }

    /// Process a payment lifecycle event reported by the gateway.
    ///
    /// The webhook body is only trusted for the payment id; the status is
    /// re-fetched from the gateway before anything happens. A `paid` result
    /// applies the full transition atomically, with the expiry recomputed
    /// from "now" so redelivered events cannot stack extensions. Terminal
    /// non-paid results are logged and acknowledged without any mutation.
    /// Errors propagate so the gateway's retry mechanism redelivers.
    pub async fn handle_payment_event(&self, payment_id: &str) -> Result<(), BillingError> {
        let gateway = self.gateway.as_ref().ok_or(BillingError::NotConfigured)?;
        let payment = gateway.fetch_payment(payment_id).await?;

        match payment.status {
            PaymentStatus::Paid => {
                let metadata = payment
                    .metadata
                    .ok_or_else(|| BillingError::MissingMetadata(payment.id.clone()))?;

                let plan = Plan::parse(&metadata.plan).ok_or_else(|| BillingError::UnknownPlan {
                    payment_id: payment.id.clone(),
                    plan: metadata.plan.clone(),
                })?;

                let subscription = Subscription::activate(plan, Utc::now()).ok_or_else(|| {
                    BillingError::UnknownPlan {
                        payment_id: payment.id.clone(),
                        plan: metadata.plan.clone(),
                    }
                })?;

                self.store
                    .update_subscription(
                        &metadata.user_id,
                        &subscription,
                        payment.customer_id.as_deref(),
                    )
                    .await?;

                tracing::info!(
                    user_id = %metadata.user_id,
                    plan = %plan,
                    payment_id = %payment.id,
                    "Subscription activated"
                );
            }
            status if status.is_terminal_non_paid() => {
                tracing::info!(
                    payment_id = %payment.id,
                    status = status.as_str(),
                    "Terminal non-paid payment event, subscription unchanged"
                );
            }
            status => {
                tracing::debug!(
                    payment_id = %payment.id,
                    status = status.as_str(),
                    "Ignoring non-terminal payment event"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mollie::{CheckoutSession, Payment};
    use chrono::{DateTime, Duration, Months};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        updates: Mutex<Vec<(String, Subscription, Option<String>)>>,
    }

    #[async_trait]
    impl SubscriptionStore for RecordingStore {
        async fn update_subscription(
            &self,
            user_id: &str,
            subscription: &Subscription,
            customer_ref: Option<&str>,
        ) -> Result<(), StorageError> {
            self.updates.lock().unwrap().push((
                user_id.to_string(),
                *subscription,
                customer_ref.map(String::from),
            ));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        payments: HashMap<String, Payment>,
        created: Mutex<Vec<CheckoutRequest>>,
        fail_fetch: bool,
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_payment(
            &self,
            req: &CheckoutRequest,
        ) -> Result<CheckoutSession, GatewayError> {
            self.created.lock().unwrap().push(req.clone());
            Ok(CheckoutSession {
                payment_id: "tr_test".to_string(),
                checkout_url: "https://checkout.example/tr_test".to_string(),
            })
        }

        async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, GatewayError> {
            if self.fail_fetch {
                return Err(GatewayError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }

            self.payments
                .get(payment_id)
                .cloned()
                .ok_or(GatewayError::Api {
                    status: 404,
                    message: "unknown payment".to_string(),
                })
        }
    }

    fn paid_payment(id: &str, plan: &str) -> Payment {
        Payment {
            id: id.to_string(),
            status: PaymentStatus::Paid,
            metadata: Some(PaymentMetadata {
                user_id: "user-1".to_string(),
                plan: plan.to_string(),
            }),
            customer_id: Some("cst_42".to_string()),
        }
    }

    fn service(
        gateway: FakeGateway,
    ) -> (BillingService, Arc<RecordingStore>, Arc<FakeGateway>) {
        let store = Arc::new(RecordingStore::default());
        let gateway = Arc::new(gateway);
        let service = BillingService::new(
            store.clone(),
            Some(gateway.clone() as Arc<dyn PaymentGateway>),
            "https://app.example".to_string(),
        );
        (service, store, gateway)
    }

    fn expires_at(subscription: &Subscription) -> DateTime<Utc> {
        match subscription {
            Subscription::ActivePro { expires_at } | Subscription::ActiveYear { expires_at } => {
                *expires_at
            }
            other => panic!("subscription {other:?} has no expiry"),
        }
    }

    #[tokio::test]
    async fn checkout_for_start_never_calls_gateway_or_mutates() {
        let (service, store, gateway) = service(FakeGateway::default());

        let result = service.create_checkout("user-1", "Start").await;

        assert!(matches!(result, Err(BillingError::InvalidPlan)));
        assert!(gateway.created.lock().unwrap().is_empty());
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_for_unknown_plan_errors_without_gateway_call() {
        let (service, store, gateway) = service(FakeGateway::default());

        let result = service.create_checkout("user-1", "Platinum").await;

        assert!(matches!(result, Err(BillingError::InvalidPlan)));
        assert!(gateway.created.lock().unwrap().is_empty());
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_without_credential_is_a_configuration_error() {
        let store = Arc::new(RecordingStore::default());
        let service =
            BillingService::new(store.clone(), None, "https://app.example".to_string());

        let result = service.create_checkout("user-1", "Pro").await;

        assert!(matches!(result, Err(BillingError::NotConfigured)));
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_attaches_price_urls_and_metadata() {
        let (service, store, gateway) = service(FakeGateway::default());

        let url = service.create_checkout("user-1", "Pro").await.unwrap();

        assert_eq!(url, "https://checkout.example/tr_test");
        assert!(store.updates.lock().unwrap().is_empty());

        let created = gateway.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        let req = &created[0];
        assert_eq!(req.amount, rust_decimal::Decimal::new(1499, 2));
        assert_eq!(req.metadata.user_id, "user-1");
        assert_eq!(req.metadata.plan, "Pro");
        assert_eq!(
            req.redirect_url,
            "https://app.example/payment/success?plan=Pro"
        );
        assert_eq!(req.webhook_url, "https://app.example/payment/webhook");
    }

    #[tokio::test]
    async fn paid_event_activates_the_subscription() {
        let mut gateway = FakeGateway::default();
        gateway
            .payments
            .insert("tr_1".to_string(), paid_payment("tr_1", "Jaar"));
        let (service, store, _) = service(gateway);

        let before = Utc::now();
        service.handle_payment_event("tr_1").await.unwrap();

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (user_id, subscription, customer_ref) = &updates[0];
        assert_eq!(user_id, "user-1");
        assert_eq!(customer_ref.as_deref(), Some("cst_42"));

        let expiry = expires_at(subscription);
        let expected = before.checked_add_months(Months::new(12)).unwrap();
        assert!(expiry >= expected);
        assert!(expiry <= expected + Duration::seconds(30));
    }

    #[tokio::test]
    async fn duplicate_paid_event_does_not_accumulate_expiry() {
        let mut gateway = FakeGateway::default();
        gateway
            .payments
            .insert("tr_1".to_string(), paid_payment("tr_1", "Pro"));
        let (service, store, _) = service(gateway);

        service.handle_payment_event("tr_1").await.unwrap();
        service.handle_payment_event("tr_1").await.unwrap();

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);

        let first = expires_at(&updates[0].1);
        let second = expires_at(&updates[1].1);

        // Both deliveries compute "now + 1 month"; the second may only drift
        // by the time between deliveries, never a whole extra period.
        assert!(second >= first);
        assert!(second - first < Duration::seconds(30));
    }

    #[tokio::test]
    async fn terminal_non_paid_events_never_mutate() {
        for status in [
            PaymentStatus::Canceled,
            PaymentStatus::Expired,
            PaymentStatus::Failed,
        ] {
            let mut payment = paid_payment("tr_1", "Pro");
            payment.status = status;

            let mut gateway = FakeGateway::default();
            gateway.payments.insert("tr_1".to_string(), payment);
            let (service, store, _) = service(gateway);

            service.handle_payment_event("tr_1").await.unwrap();

            assert!(
                store.updates.lock().unwrap().is_empty(),
                "{} must not mutate",
                status.as_str()
            );
        }
    }

    #[tokio::test]
    async fn open_event_is_acknowledged_without_mutation() {
        let mut payment = paid_payment("tr_1", "Pro");
        payment.status = PaymentStatus::Open;

        let mut gateway = FakeGateway::default();
        gateway.payments.insert("tr_1".to_string(), payment);
        let (service, store, _) = service(gateway);

        service.handle_payment_event("tr_1").await.unwrap();
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn gateway_fetch_failure_propagates_and_mutates_nothing() {
        let gateway = FakeGateway {
            fail_fetch: true,
            ..FakeGateway::default()
        };
        let (service, store, _) = service(gateway);

        let result = service.handle_payment_event("tr_1").await;

        assert!(matches!(result, Err(BillingError::Gateway(_))));
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn paid_event_without_metadata_is_a_processing_error() {
        let mut payment = paid_payment("tr_1", "Pro");
        payment.metadata = None;

        let mut gateway = FakeGateway::default();
        gateway.payments.insert("tr_1".to_string(), payment);
        let (service, store, _) = service(gateway);

        let result = service.handle_payment_event("tr_1").await;

        assert!(matches!(result, Err(BillingError::MissingMetadata(_))));
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn paid_event_with_unpurchasable_plan_is_a_processing_error() {
        for plan in ["Start", "Platinum"] {
            let mut gateway = FakeGateway::default();
            gateway
                .payments
                .insert("tr_1".to_string(), paid_payment("tr_1", plan));
            let (service, store, _) = service(gateway);

            let result = service.handle_payment_event("tr_1").await;

            assert!(matches!(result, Err(BillingError::UnknownPlan { .. })));
            assert!(store.updates.lock().unwrap().is_empty());
        }
    }
}
