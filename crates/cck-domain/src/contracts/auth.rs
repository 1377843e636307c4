//! Authentication contract and domain types
//!
//! Each client can bind a different implementation behind `Auth.Service`
//! (mock, SSO-backed, custom API). Consumers never see the concrete type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// User login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Authenticated user data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// User email address
    pub email: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Registration payload for new accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response from successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Authenticated user data
    pub user: User,
    /// Access token
    pub token: String,
    /// Token for refreshing access
    pub refresh_token: String,
}

/// Token pair for token refresh operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service contract
///
/// Bound behind the `Auth.Service` token; a required service in the default
/// validation list.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate a user with email/password
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse>;

    /// Register a new user with email/password
    async fn register(&self, data: RegisterData) -> Result<AuthResponse>;

    /// Sign out the current user and clear tokens
    async fn logout(&self) -> Result<()>;

    /// Exchange a refresh token for a new access token
    async fn refresh_token(&self, token: &str) -> Result<String>;

    /// Currently authenticated user, if any
    async fn current_user(&self) -> Result<Option<User>>;
}

/// Handle to an externally configured single-sign-on SDK
///
/// Supplied by the caller through the composition options when the host
/// application already owns an authenticated SDK instance; the container
/// binds it as a constant value under `Auth.SsoHandle` so an override
/// module can route `Auth.Service` through it.
#[async_trait]
pub trait SsoAuthHandle: Send + Sync {
    /// Sign in through the external SDK
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthResponse>;

    /// Create an account through the external SDK
    async fn sign_up(&self, data: RegisterData) -> Result<AuthResponse>;

    /// Sign out through the external SDK
    async fn sign_out(&self) -> Result<()>;

    /// User currently signed in to the external SDK
    async fn current_user(&self) -> Result<Option<User>>;
}
