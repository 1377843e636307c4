//! # Client Composition Kit
//!
//! Runtime service composition for multi-client applications: bind
//! abstract service contracts to concrete implementations through named
//! tokens, assemble them into a per-client object graph, validate the
//! graph, and resolve instances from a scoped container.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use cck::container::{compose, scope, tokens, ComposeOptions, Registries};
//! use cck::domain::contracts::{ApiClient, AuthService};
//! use cck::services::core_module;
//!
//! let registries = Registries::builtin();
//! let container = compose(
//!     &registries,
//!     ComposeOptions::new(core_module())
//!         .with_client_id("example-client")
//!         .with_http_client(ApiClient::new("https://api.example.com")),
//! )
//! .await?;
//!
//! let container = Arc::new(container);
//! let _guard = scope::enter(container.clone());
//! let auth: Arc<dyn AuthService> = scope::resolve(tokens::auth::service())?;
//! ```
//!
//! ## Layering
//!
//! - `domain` - service contracts, value types, error taxonomy
//! - `container` - tokens, modules, container, registries, composition,
//!   validation, scoped access
//! - `services` - mock/demo implementations and the built-in modules

/// Domain layer - contracts and core types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cck_domain::*;
}

/// Composition engine - container, modules, registries, validation
///
/// Re-exports from the container crate for convenience
pub mod container {
    pub use cck_container::*;
}

/// Service implementations and module definitions
///
/// Re-exports from the services crate for convenience
pub mod services {
    pub use cck_services::*;
}

pub use cck_domain::error::{Error, Result};
