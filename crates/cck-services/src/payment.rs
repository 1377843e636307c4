//! Mock payment service
//!
//! Simulates payment processing for development and testing. Outcomes are
//! deterministic: confirming a known pending intent succeeds, confirming an
//! unknown intent is declined.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use cck_domain::contracts::{
    CreatePaymentParams, PaymentIntent, PaymentMethod, PaymentMethodKind, PaymentResult,
    PaymentService, PaymentStatus,
};
use cck_domain::error::Result;

/// Mock payment service with seeded payment methods
#[derive(Debug)]
pub struct MockPaymentService {
    methods: RwLock<Vec<PaymentMethod>>,
    pending: RwLock<HashMap<String, PaymentIntent>>,
}

impl Default for MockPaymentService {
    fn default() -> Self {
        Self {
            methods: RwLock::new(vec![
                PaymentMethod {
                    id: "pm_mock_visa".to_string(),
                    kind: PaymentMethodKind::Card,
                    last4: Some("4242".to_string()),
                    brand: Some("Visa".to_string()),
                    is_default: true,
                },
                PaymentMethod {
                    id: "pm_mock_mc".to_string(),
                    kind: PaymentMethodKind::Card,
                    last4: Some("5555".to_string()),
                    brand: Some("Mastercard".to_string()),
                    is_default: false,
                },
            ]),
            pending: RwLock::new(HashMap::new()),
        }
    }
}

impl MockPaymentService {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(prefix: &str) -> String {
        format!("{prefix}_{}", Uuid::new_v4().simple())
    }
}

#[async_trait]
impl PaymentService for MockPaymentService {
    async fn create_payment_intent(&self, params: CreatePaymentParams) -> Result<PaymentIntent> {
        debug!(amount = params.amount, currency = %params.currency, "creating payment intent");

        let intent = PaymentIntent {
            id: Self::generate_id("pi"),
            amount: params.amount,
            currency: params.currency,
            status: PaymentStatus::Pending,
            client_secret: Some(Self::generate_id("secret")),
        };

        self.pending
            .write()
            .expect("payment state lock poisoned")
            .insert(intent.id.clone(), intent.clone());

        Ok(intent)
    }

    async fn confirm_payment(&self, intent_id: &str) -> Result<PaymentResult> {
        debug!(intent_id, "confirming payment");

        let removed = self
            .pending
            .write()
            .expect("payment state lock poisoned")
            .remove(intent_id);

        match removed {
            Some(_) => Ok(PaymentResult {
                success: true,
                transaction_id: Some(Self::generate_id("txn")),
                error: None,
            }),
            None => Ok(PaymentResult {
                success: false,
                transaction_id: None,
                error: Some("Payment intent not found".to_string()),
            }),
        }
    }

    async fn cancel_payment(&self, intent_id: &str) -> Result<()> {
        debug!(intent_id, "cancelling payment");
        self.pending
            .write()
            .expect("payment state lock poisoned")
            .remove(intent_id);
        Ok(())
    }

    async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        Ok(self
            .methods
            .read()
            .expect("payment state lock poisoned")
            .clone())
    }

    async fn add_payment_method(&self, token: &str) -> Result<PaymentMethod> {
        debug!(token, "adding payment method");

        let mut methods = self.methods.write().expect("payment state lock poisoned");
        let last4 = if token.len() >= 4 {
            token[token.len() - 4..].to_string()
        } else {
            "0000".to_string()
        };
        let method = PaymentMethod {
            id: Self::generate_id("pm"),
            kind: PaymentMethodKind::Card,
            last4: Some(last4),
            brand: None,
            is_default: methods.is_empty(),
        };
        methods.push(method.clone());

        Ok(method)
    }

    async fn remove_payment_method(&self, method_id: &str) -> Result<()> {
        debug!(method_id, "removing payment method");
        self.methods
            .write()
            .expect("payment state lock poisoned")
            .retain(|m| m.id != method_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(amount: u64) -> CreatePaymentParams {
        CreatePaymentParams {
            amount,
            currency: "usd".to_string(),
            payment_method_id: None,
            metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn create_then_confirm_succeeds() {
        let payments = MockPaymentService::new();
        let intent = payments.create_payment_intent(params(1000)).await.unwrap();
        assert_eq!(intent.status, PaymentStatus::Pending);
        assert!(intent.client_secret.is_some());

        let result = payments.confirm_payment(&intent.id).await.unwrap();
        assert!(result.success);
        assert!(result.transaction_id.is_some());
    }

    #[tokio::test]
    async fn confirm_unknown_intent_is_declined() {
        let payments = MockPaymentService::new();
        let result = payments.confirm_payment("pi_ghost").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Payment intent not found"));
    }

    #[tokio::test]
    async fn cancel_removes_the_pending_intent() {
        let payments = MockPaymentService::new();
        let intent = payments.create_payment_intent(params(500)).await.unwrap();

        payments.cancel_payment(&intent.id).await.unwrap();
        let result = payments.confirm_payment(&intent.id).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn payment_methods_can_be_added_and_removed() {
        let payments = MockPaymentService::new();
        assert_eq!(payments.get_payment_methods().await.unwrap().len(), 2);

        let added = payments.add_payment_method("tok_9876").await.unwrap();
        assert_eq!(added.last4.as_deref(), Some("9876"));
        assert_eq!(payments.get_payment_methods().await.unwrap().len(), 3);

        payments.remove_payment_method(&added.id).await.unwrap();
        assert_eq!(payments.get_payment_methods().await.unwrap().len(), 2);
    }
}
