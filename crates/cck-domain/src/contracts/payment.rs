//! Payment contract and domain types

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of payment method on file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    Card,
    Bank,
    Wallet,
}

/// A saved payment method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub kind: PaymentMethodKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub is_default: bool,
}

/// Processing state of a payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Succeeded,
    Failed,
    Cancelled,
}

/// A payment in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Amount in the currency's minor unit
    pub amount: u64,
    pub currency: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// Outcome of confirming a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parameters for creating a payment intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentParams {
    /// Amount in the currency's minor unit
    pub amount: u64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// Payment service contract
///
/// Bound behind `Payment.Service`; gateway-specific wiring (Stripe, PayPal)
/// hangs off `Payment.Gateway` in client modules that need it.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Create a payment intent for processing
    async fn create_payment_intent(&self, params: CreatePaymentParams) -> Result<PaymentIntent>;

    /// Confirm and process a payment
    async fn confirm_payment(&self, intent_id: &str) -> Result<PaymentResult>;

    /// Cancel a pending payment
    async fn cancel_payment(&self, intent_id: &str) -> Result<()>;

    /// Saved payment methods for the current user
    async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>>;

    /// Attach a new payment method from a gateway token
    async fn add_payment_method(&self, token: &str) -> Result<PaymentMethod>;

    /// Detach a payment method
    async fn remove_payment_method(&self, method_id: &str) -> Result<()>;
}
