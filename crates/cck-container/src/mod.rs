//! Composition Engine - Container, Modules, and Validation
//!
//! This crate implements the service-composition layer: named tokens are
//! bound to implementation-producing rules, modules group those bindings
//! into replayable layers, and the composition function merges the layers
//! into a validated container per client/preset.
//!
//! ## Architecture
//!
//! ```text
//! Token interner          Registries (clients/presets)
//! ──────────────          ────────────────────────────
//! Token::intern()    →    ModuleRegistry::load(id)  ← linkme builtins
//!        │                            │
//!        ▼                            ▼
//! ┌─────────────────────────────────────────────────┐
//! │ compose(registries, options)                    │
//! │   1. empty Container                            │
//! │   2. external handles (constants)               │
//! │   3. base module                                │
//! │   4. client/preset module (lazy, async)         │
//! │   5. overrides module (always last)             │
//! │   6. assert_valid(required tokens)              │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//!         scope::enter(container)
//!         scope::resolve::<T>(token)
//! ```
//!
//! Layer ordering is the central contract: later layers replace bindings
//! from earlier layers (via `rebind`), and validation sees the final,
//! fully-merged state.

pub mod binding;
pub mod compose;
pub mod config;
pub mod container;
pub mod logging;
pub mod module;
pub mod registry;
pub mod scope;
pub mod token;
pub mod validate;

pub use binding::{Lifecycle, Provider, Shared};
pub use compose::{compose, ComposeOptions, ExternalHandles, SelectorPolicy};
pub use config::{AppConfig, LoggingConfig};
pub use container::{Container, Resolver};
pub use logging::{init_logging, parse_log_level};
pub use module::{Binder, Module};
pub use registry::{
    ModuleRegistry, Registries, RegisteredModule, CLIENT_MODULES, PRESET_MODULES,
};
pub use token::wellknown as tokens;
pub use token::Token;
pub use validate::{assert_valid, default_required, validate, RequiredService, ValidationResult};
