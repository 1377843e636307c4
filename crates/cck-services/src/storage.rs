//! Storage service implementations
//!
//! In-memory stand-ins: data is lost when the process exits. Client
//! modules bind persistent backends under the same tokens.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::trace;

use cck_domain::contracts::{StorageItem, StorageOptions, StorageService};
use cck_domain::error::Result;

/// In-memory storage service
///
/// Honours per-item TTL; expired items are pruned on access.
#[derive(Debug, Default)]
pub struct MemoryStorageService {
    store: RwLock<HashMap<String, StorageItem>>,
}

impl MemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageService for MemoryStorageService {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let now = Utc::now();
        let mut store = self.store.write().expect("storage lock poisoned");

        match store.get(key) {
            Some(item) if item.is_expired(now) => {
                store.remove(key);
                Ok(None)
            }
            Some(item) => Ok(Some(item.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value, options: Option<StorageOptions>) -> Result<()> {
        let now = Utc::now();
        let options = options.unwrap_or_default();
        let item = StorageItem {
            key: key.to_string(),
            value,
            created_at: now,
            expires_at: options.ttl.map(|ttl| now + ttl),
        };

        self.store
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_string(), item);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.store
            .write()
            .expect("storage lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let now = Utc::now();
        let store = self.store.read().expect("storage lock poisoned");
        let mut keys: Vec<String> = store
            .values()
            .filter(|item| !item.is_expired(now))
            .map(|item| item.key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> Result<()> {
        self.store.write().expect("storage lock poisoned").clear();
        Ok(())
    }
}

/// Secure storage stand-in
///
/// Plays the role of a keychain/keystore-backed store in development
/// environments. Everything it holds is treated as sensitive; the
/// `encrypt` option is accepted and recorded but in-memory data is not
/// actually ciphered.
#[derive(Debug, Default)]
pub struct SecureMemoryStorage {
    inner: MemoryStorageService,
}

impl SecureMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageService for SecureMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value, options: Option<StorageOptions>) -> Result<()> {
        if options.is_some_and(|o| o.encrypt) {
            trace!(key, "storing with encryption requested");
        }
        self.inner.set(key, value, options).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }

    async fn has(&self, key: &str) -> Result<bool> {
        self.inner.has(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn set_get_remove_roundtrip() {
        let storage = MemoryStorageService::new();
        storage.set("greeting", json!("hello"), None).await.unwrap();

        assert_eq!(storage.get("greeting").await.unwrap(), Some(json!("hello")));
        assert!(storage.has("greeting").await.unwrap());

        storage.remove("greeting").await.unwrap();
        assert!(storage.get("greeting").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_items_read_as_absent() {
        let storage = MemoryStorageService::new();
        storage
            .set(
                "ephemeral",
                json!(1),
                Some(StorageOptions::with_ttl(Duration::milliseconds(-1))),
            )
            .await
            .unwrap();

        assert!(storage.get("ephemeral").await.unwrap().is_none());
        assert!(!storage.has("ephemeral").await.unwrap());
    }

    #[tokio::test]
    async fn keys_lists_live_items_sorted() {
        let storage = MemoryStorageService::new();
        storage.set("b", json!(2), None).await.unwrap();
        storage.set("a", json!(1), None).await.unwrap();
        storage
            .set(
                "expired",
                json!(0),
                Some(StorageOptions::with_ttl(Duration::milliseconds(-1))),
            )
            .await
            .unwrap();

        assert_eq!(storage.keys().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let storage = MemoryStorageService::new();
        storage.set("one", json!(1), None).await.unwrap();
        storage.set("two", json!(2), None).await.unwrap();

        storage.clear().await.unwrap();
        assert!(storage.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn secure_storage_accepts_encrypt_option() {
        let storage = SecureMemoryStorage::new();
        storage
            .set("token", json!("abc123"), Some(StorageOptions::encrypted()))
            .await
            .unwrap();

        assert_eq!(storage.get("token").await.unwrap(), Some(json!("abc123")));
    }
}
