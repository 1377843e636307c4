//! Authentication service implementations

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use cck_domain::contracts::{
    AuthResponse, AuthService, Credentials, RegisterData, SsoAuthHandle, User,
};
use cck_domain::error::Result;

/// Default authentication service implementation
///
/// A placeholder that accepts any credentials and keeps the signed-in user
/// in memory. Client modules replace it with a real implementation.
#[derive(Debug, Default)]
pub struct MockAuthService {
    current_user: RwLock<Option<User>>,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    fn display_name(email: &str) -> Option<String> {
        email.split('@').next().map(str::to_string)
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse> {
        debug!(email = %credentials.email, "login attempt");

        let user = User {
            id: "user-1".to_string(),
            email: credentials.email.clone(),
            name: Self::display_name(&credentials.email),
            avatar: None,
        };

        *self
            .current_user
            .write()
            .expect("auth state lock poisoned") = Some(user.clone());

        Ok(AuthResponse {
            user,
            token: "mock-jwt-token".to_string(),
            refresh_token: "mock-refresh-token".to_string(),
        })
    }

    async fn register(&self, data: RegisterData) -> Result<AuthResponse> {
        debug!(email = %data.email, "register attempt");

        let user = User {
            id: "user-new".to_string(),
            email: data.email.clone(),
            name: data.name.clone().or_else(|| Self::display_name(&data.email)),
            avatar: None,
        };

        *self
            .current_user
            .write()
            .expect("auth state lock poisoned") = Some(user.clone());

        Ok(AuthResponse {
            user,
            token: "mock-jwt-token".to_string(),
            refresh_token: "mock-refresh-token".to_string(),
        })
    }

    async fn logout(&self) -> Result<()> {
        debug!("logout");
        *self
            .current_user
            .write()
            .expect("auth state lock poisoned") = None;
        Ok(())
    }

    async fn refresh_token(&self, _token: &str) -> Result<String> {
        debug!("refreshing token");
        Ok("new-mock-jwt-token".to_string())
    }

    async fn current_user(&self) -> Result<Option<User>> {
        Ok(self
            .current_user
            .read()
            .expect("auth state lock poisoned")
            .clone())
    }
}

/// Auth service backed by an external SSO SDK handle
///
/// Delegates every operation to the [`SsoAuthHandle`] the host application
/// supplied through the composition options. Token refresh is the SDK's
/// job, so `refresh_token` hands the current token back unchanged.
pub struct SsoAuthService {
    handle: Arc<dyn SsoAuthHandle>,
}

impl SsoAuthService {
    pub fn new(handle: Arc<dyn SsoAuthHandle>) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl AuthService for SsoAuthService {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse> {
        debug!(email = %credentials.email, "SSO login");
        self.handle.sign_in(credentials).await
    }

    async fn register(&self, data: RegisterData) -> Result<AuthResponse> {
        debug!(email = %data.email, "SSO register");
        self.handle.sign_up(data).await
    }

    async fn logout(&self) -> Result<()> {
        debug!("SSO logout");
        self.handle.sign_out().await
    }

    async fn refresh_token(&self, token: &str) -> Result<String> {
        // The SDK refreshes transparently; nothing to exchange here.
        Ok(token.to_string())
    }

    async fn current_user(&self) -> Result<Option<User>> {
        self.handle.current_user().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_tracks_current_user() {
        let auth = MockAuthService::new();
        let response = auth
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.user.email, "ada@example.com");
        assert_eq!(response.user.name.as_deref(), Some("ada"));

        let current = auth.current_user().await.unwrap();
        assert_eq!(current.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn logout_clears_current_user() {
        let auth = MockAuthService::new();
        auth.login(Credentials {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

        auth.logout().await.unwrap();
        assert!(auth.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_prefers_explicit_name() {
        let auth = MockAuthService::new();
        let response = auth
            .register(RegisterData {
                email: "grace@example.com".to_string(),
                password: "secret".to_string(),
                name: Some("Grace".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.user.name.as_deref(), Some("Grace"));
    }
}
