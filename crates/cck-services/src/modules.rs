//! Module definitions - the composable binding layers
//!
//! - [`core_module`]: the base layer, binding every core service.
//! - [`mock_preset_module`]: preset layer for development/testing; loaded
//!   after the base, so it replaces bindings with `rebind`.
//! - [`example_client_module`]: template for client-specific layers; shows
//!   the defensive `is_bound`/`unbind`/`bind` override pattern.
//! - [`sso_override_module`]: override layer routing `Auth.Service`
//!   through an externally supplied SSO handle.
//!
//! The built-in client and preset are registered at compile time into the
//! engine's distributed slices, so `Registries::builtin()` knows them
//! without any startup call.

use std::sync::Arc;

use futures::future::BoxFuture;

use cck_container::registry::{RegisteredModule, CLIENT_MODULES, PRESET_MODULES};
use cck_container::{tokens, Lifecycle, Module};
use cck_domain::contracts::{
    AnalyticsService, ApiClient, AuthService, PaymentService, SsoAuthHandle, StorageService,
    UserService,
};
use cck_domain::error::Result;

use crate::analytics::TracingAnalyticsService;
use crate::auth::{MockAuthService, SsoAuthService};
use crate::payment::MockPaymentService;
use crate::storage::{MemoryStorageService, SecureMemoryStorage};
use crate::user::ApiUserService;

/// Core module - binds all core services
///
/// Loaded first and unconditionally by every composition. Client and
/// preset layers replace individual bindings afterwards.
pub fn core_module() -> Module {
    Module::new("core", |binder| {
        // Auth
        binder.bind(tokens::auth::service(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MockAuthService::new()) as Arc<dyn AuthService>)
        })?;

        // Storage
        binder.bind(tokens::storage::local(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MemoryStorageService::new()) as Arc<dyn StorageService>)
        })?;
        binder.bind(tokens::storage::secure(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(SecureMemoryStorage::new()) as Arc<dyn StorageService>)
        })?;

        // Payments
        binder.bind(tokens::payment::service(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MockPaymentService::new()) as Arc<dyn PaymentService>)
        })?;

        // Analytics
        binder.bind(tokens::analytics::service(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(TracingAnalyticsService::new()) as Arc<dyn AnalyticsService>)
        })?;

        // User CRUD - depends on the externally supplied HTTP handle
        binder.bind(tokens::user::service(), Lifecycle::Singleton, |resolver| {
            let http: ApiClient = resolver.get(tokens::http::client())?;
            Ok(Arc::new(ApiUserService::new(http)) as Arc<dyn UserService>)
        })
    })
}

/// Mock preset module
///
/// For development and testing: in-memory implementations that need no
/// external services. Loads after the core layer, so it replaces bindings
/// with `rebind` (plain `bind` on a bound token is a conflict).
pub fn mock_preset_module() -> Module {
    Module::new("mock-preset", |binder| {
        binder.rebind(tokens::auth::service(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MockAuthService::new()) as Arc<dyn AuthService>)
        })?;
        binder.rebind(tokens::storage::local(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MemoryStorageService::new()) as Arc<dyn StorageService>)
        })
    })
}

/// Example client module
///
/// Template for client-specific bindings: copy, swap in the client's
/// implementations, register under the client's id. Uses the defensive
/// probe-then-replace pattern so it also loads into containers where the
/// base layer bound nothing.
pub fn example_client_module() -> Module {
    Module::new("example-client", |binder| {
        // Override the auth service.
        if binder.is_bound(tokens::auth::service()) {
            binder.unbind(tokens::auth::service());
        }
        binder.bind(tokens::auth::service(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MockAuthService::new()) as Arc<dyn AuthService>)
        })?;

        // Override local storage.
        if binder.is_bound(tokens::storage::local()) {
            binder.unbind(tokens::storage::local());
        }
        binder.bind(tokens::storage::local(), Lifecycle::Singleton, |_| {
            Ok(Arc::new(MemoryStorageService::new()) as Arc<dyn StorageService>)
        })
    })
}

/// SSO override module
///
/// Applied as the overrides layer when the host supplied an external SSO
/// handle: routes `Auth.Service` through [`SsoAuthService`], which resolves
/// the constant-bound `Auth.SsoHandle`.
pub fn sso_override_module() -> Module {
    Module::new("sso-override", |binder| {
        binder.rebind(tokens::auth::service(), Lifecycle::Singleton, |resolver| {
            let handle: Arc<dyn SsoAuthHandle> = resolver.get(tokens::auth::sso_handle())?;
            Ok(Arc::new(SsoAuthService::new(handle)) as Arc<dyn AuthService>)
        })
    })
}

// ============================================================================
// Built-in registrations
// ============================================================================

fn load_example_client() -> BoxFuture<'static, Result<Module>> {
    Box::pin(async { Ok(example_client_module()) })
}

#[linkme::distributed_slice(CLIENT_MODULES)]
static EXAMPLE_CLIENT: RegisteredModule = RegisteredModule {
    id: "example-client",
    description: "Reference client bindings for development",
    loader: load_example_client,
};

fn load_mock_preset() -> BoxFuture<'static, Result<Module>> {
    Box::pin(async { Ok(mock_preset_module()) })
}

#[linkme::distributed_slice(PRESET_MODULES)]
static MOCK_PRESET: RegisteredModule = RegisteredModule {
    id: "mock",
    description: "In-memory implementations, no external services",
    loader: load_mock_preset,
};
