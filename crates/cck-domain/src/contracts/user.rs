//! User CRUD contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::contracts::auth::User;
use crate::error::Result;

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Payload for updating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// User service contract
///
/// CRUD operations over the backing API; implementations depend on the
/// `Http.Client` binding for transport.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Current user's profile
    async fn get_profile(&self) -> Result<User>;

    /// Fetch a user by id
    async fn get_by_id(&self, id: &str) -> Result<User>;

    /// Create a new user
    async fn create(&self, data: CreateUserRequest) -> Result<User>;

    /// Update an existing user
    async fn update(&self, id: &str, data: UpdateUserRequest) -> Result<User>;

    /// Delete a user
    async fn delete(&self, id: &str) -> Result<()>;
}
