//! # cck-services
//!
//! Service implementations and module definitions for the Client
//! Composition Kit.
//!
//! The implementations here are development/testing collaborators: mock
//! auth, in-memory storage, a simulated payment gateway, tracing-backed
//! analytics, and an HTTP-backed user service. Production clients bind
//! their own implementations in client modules; these exist so a composed
//! container works out of the box.
//!
//! [`modules`] defines the layer modules (core, mock preset, example
//! client, SSO override) and registers the built-ins into the engine's
//! compile-time slices.

pub mod analytics;
pub mod auth;
pub mod modules;
pub mod payment;
pub mod storage;
pub mod user;

pub use analytics::TracingAnalyticsService;
pub use auth::{MockAuthService, SsoAuthService};
pub use modules::{core_module, example_client_module, mock_preset_module, sso_override_module};
pub use payment::MockPaymentService;
pub use storage::{MemoryStorageService, SecureMemoryStorage};
pub use user::ApiUserService;
