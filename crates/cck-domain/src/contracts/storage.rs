//! Storage contract and domain types
//!
//! Values are exchanged as `serde_json::Value` so the trait stays
//! object-safe; callers serialize their own types at the boundary.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Per-item storage options
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageOptions {
    /// Time-to-live; the item is treated as absent after expiry
    pub ttl: Option<Duration>,
    /// Encrypt the value (honoured by secure storage backends)
    pub encrypt: bool,
}

impl StorageOptions {
    /// Options with a time-to-live
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    /// Options requesting encryption at rest
    pub fn encrypted() -> Self {
        Self {
            encrypt: true,
            ..Self::default()
        }
    }
}

/// A stored value with bookkeeping metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageItem {
    pub key: String,
    pub value: Value,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StorageItem {
    /// Whether the item has passed its expiry time
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// Storage service contract
///
/// Implementations range from in-memory maps to secure keychain-backed
/// stores; the `Storage.Local` / `Storage.Secure` / `Storage.Remote`
/// tokens select between them.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Fetch a value; `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value, optionally with TTL/encryption options
    async fn set(&self, key: &str, value: Value, options: Option<StorageOptions>) -> Result<()>;

    /// Remove a value; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// Whether a live (non-expired) value exists for the key
    async fn has(&self, key: &str) -> Result<bool>;

    /// All live keys
    async fn keys(&self) -> Result<Vec<String>>;

    /// Drop every stored value
    async fn clear(&self) -> Result<()>;
}
