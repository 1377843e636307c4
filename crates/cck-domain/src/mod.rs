//! # cck-domain
//!
//! Domain layer for the Client Composition Kit.
//!
//! This crate defines the service contracts (ports) consumed by the
//! composition engine and the error taxonomy shared across the workspace.
//! It contains no wiring logic and no service implementations: contracts
//! live here, mock implementations live in `cck-services`, and the
//! container/composition machinery lives in `cck-container`.

pub mod contracts;
pub mod error;

pub use contracts::*;
pub use error::{Error, Result};
