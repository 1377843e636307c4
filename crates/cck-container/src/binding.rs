//! Bindings - providers and lifecycles
//!
//! A binding associates a token with a provider (factory closure or
//! constant value) and a lifecycle. Values are stored type-erased; the
//! container's typed `get` recovers the concrete type on resolution.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use cck_domain::error::Result;

use crate::container::Resolver;
use crate::token::Token;

/// Type-erased service value
///
/// For trait-object services the stored value is the `Arc<dyn Trait>`
/// itself, e.g. `get::<Arc<dyn AuthService>>(token)`.
pub type Shared = Arc<dyn Any + Send + Sync>;

/// Type-erased factory closure
///
/// Factories receive a [`Resolver`] to pull their own dependencies from the
/// container; that resolver tracks the in-progress token path for cycle
/// detection.
pub type FactoryFn = Arc<dyn Fn(&mut Resolver<'_>) -> Result<Shared> + Send + Sync>;

/// Instance lifecycle for a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// One cached instance per container for the binding's lifetime
    Singleton,
    /// A fresh instance constructed on every resolution
    Transient,
}

/// Implementation-producing rule for a binding
pub enum Provider {
    /// Construct via factory closure
    Factory(FactoryFn),
    /// A caller-supplied constant value (behaves as a singleton)
    Constant(Shared),
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Factory(_) => f.write_str("Provider::Factory"),
            Provider::Constant(_) => f.write_str("Provider::Constant"),
        }
    }
}

/// A token's active binding inside one container
pub struct Binding {
    provider: Provider,
    lifecycle: Lifecycle,
    cached: OnceLock<Shared>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("provider", &self.provider)
            .field("lifecycle", &self.lifecycle)
            .field("cached", &self.cached.get().is_some())
            .finish()
    }
}

impl Binding {
    pub(crate) fn new(provider: Provider, lifecycle: Lifecycle) -> Self {
        Self {
            provider,
            lifecycle,
            cached: OnceLock::new(),
        }
    }

    /// The binding's declared lifecycle
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Produce the bound value, consulting the singleton cache
    ///
    /// For singletons the first produced instance wins: if two resolutions
    /// race within one cooperative turn, both observe the instance that
    /// reached the cache first.
    pub(crate) fn produce(&self, resolver: &mut Resolver<'_>) -> Result<Shared> {
        match &self.provider {
            Provider::Constant(value) => Ok(value.clone()),
            Provider::Factory(factory) => match self.lifecycle {
                Lifecycle::Transient => (factory.as_ref())(resolver),
                Lifecycle::Singleton => {
                    if let Some(value) = self.cached.get() {
                        return Ok(value.clone());
                    }
                    let value = (factory.as_ref())(resolver)?;
                    Ok(self.cached.get_or_init(|| value).clone())
                }
            },
        }
    }
}

/// Downcast a shared value to the requested type
pub(crate) fn downcast<T: Clone + Send + Sync + 'static>(token: Token, shared: &Shared) -> Result<T> {
    shared
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| cck_domain::Error::type_mismatch(token.name(), std::any::type_name::<T>()))
}
