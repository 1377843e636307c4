//! Service contracts (ports)
//!
//! Each contract is a named set of asynchronous operations. The composition
//! engine only needs the token identity and required-ness of these services;
//! implementations are external collaborators bound by modules.
//!
//! Consumers resolve contracts as `Arc<dyn Trait>`:
//!
//! ```ignore
//! let auth: Arc<dyn AuthService> = container.get(tokens::auth::service())?;
//! auth.login(credentials).await?;
//! ```

pub mod analytics;
pub mod auth;
pub mod http;
pub mod payment;
pub mod storage;
pub mod user;

pub use analytics::{AnalyticsEvent, AnalyticsService, UserProperties};
pub use auth::{AuthResponse, AuthService, Credentials, RegisterData, SsoAuthHandle, TokenPair, User};
pub use http::ApiClient;
pub use payment::{
    CreatePaymentParams, PaymentIntent, PaymentMethod, PaymentMethodKind, PaymentResult,
    PaymentService, PaymentStatus,
};
pub use storage::{StorageItem, StorageOptions, StorageService};
pub use user::{CreateUserRequest, UpdateUserRequest, UserService};
