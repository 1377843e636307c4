//! HTTP-backed user service
//!
//! CRUD over the backing API through the `Http.Client` binding. The module
//! factory resolves the [`ApiClient`] from the container, so this service
//! only composes when an HTTP handle was supplied.

use async_trait::async_trait;
use serde_json::Value;

use cck_domain::contracts::{ApiClient, CreateUserRequest, UpdateUserRequest, User, UserService};
use cck_domain::error::{Error, Result};

/// User service talking to the backing REST API
#[derive(Debug, Clone)]
pub struct ApiUserService {
    http: ApiClient,
}

impl ApiUserService {
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    fn decode_user(value: Value) -> Result<User> {
        serde_json::from_value(value)
            .map_err(|e| Error::network_with_source("invalid user payload", e))
    }
}

#[async_trait]
impl UserService for ApiUserService {
    async fn get_profile(&self) -> Result<User> {
        Self::decode_user(self.http.get_json("/users/me").await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<User> {
        Self::decode_user(self.http.get_json(&format!("/users/{id}")).await?)
    }

    async fn create(&self, data: CreateUserRequest) -> Result<User> {
        Self::decode_user(self.http.post_json("/users", &data).await?)
    }

    async fn update(&self, id: &str, data: UpdateUserRequest) -> Result<User> {
        Self::decode_user(self.http.patch_json(&format!("/users/{id}"), &data).await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.http.delete(&format!("/users/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_user_accepts_api_payload() {
        let user = ApiUserService::decode_user(json!({
            "id": "user-9",
            "email": "lin@example.com",
            "name": "Lin"
        }))
        .unwrap();

        assert_eq!(user.id, "user-9");
        assert_eq!(user.name.as_deref(), Some("Lin"));
    }

    #[test]
    fn decode_user_rejects_malformed_payload() {
        let err = ApiUserService::decode_user(json!({"id": 42})).unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
    }
}
