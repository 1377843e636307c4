//! Container - the exclusive-owner binding table
//!
//! A container maps tokens to bindings and resolves dependency graphs.
//! Lifecycle: created empty, populated by loading modules in a strict
//! order (base → client/preset → overrides), then conceptually frozen by
//! validation; callers must not mutate after validating.
//!
//! Binding policy (applied consistently across the workspace):
//! - `bind` on an already-bound token is a **Conflict error**; replacing a
//!   binding goes through `rebind`.
//! - `unbind` on an unbound token is a **no-op**; override modules probe
//!   `is_bound` first.

use std::collections::HashMap;
use std::sync::Arc;

use cck_domain::error::{Error, Result};
use tracing::trace;

use crate::binding::{downcast, Binding, FactoryFn, Lifecycle, Provider, Shared};
use crate::token::Token;

/// The mutable binding table for one composition session
#[derive(Debug, Default)]
pub struct Container {
    bindings: HashMap<Token, Binding>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a factory under `token` with the given lifecycle
    ///
    /// Fails with [`Error::Conflict`] if the token is already bound.
    pub fn bind<T, F>(&mut self, token: Token, lifecycle: Lifecycle, factory: F) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        let erased: FactoryFn =
            Arc::new(move |resolver| factory(resolver).map(|value| Arc::new(value) as Shared));
        self.insert(token, Binding::new(Provider::Factory(erased), lifecycle))
    }

    /// Bind a constant value under `token`
    ///
    /// Constants behave as singletons: the same value is returned on every
    /// resolution. Fails with [`Error::Conflict`] if the token is already
    /// bound.
    pub fn bind_constant<T>(&mut self, token: Token, value: T) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.insert(
            token,
            Binding::new(Provider::Constant(Arc::new(value)), Lifecycle::Singleton),
        )
    }

    /// Remove the binding for `token`; no-op when unbound
    pub fn unbind(&mut self, token: Token) {
        if self.bindings.remove(&token).is_some() {
            trace!(token = token.name(), "unbound");
        }
    }

    /// Replace the binding for `token`: unbind-if-bound, then bind
    ///
    /// Never fails for a previously unbound token.
    pub fn rebind<T, F>(&mut self, token: Token, lifecycle: Lifecycle, factory: F) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.unbind(token);
        self.bind(token, lifecycle, factory)
    }

    /// Replace the binding for `token` with a constant value
    pub fn rebind_constant<T>(&mut self, token: Token, value: T) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.unbind(token);
        self.bind_constant(token, value)
    }

    /// Whether `token` currently has a binding
    pub fn is_bound(&self, token: Token) -> bool {
        self.bindings.contains_key(&token)
    }

    /// Number of active bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the container has no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve `token` to a value of type `T`
    ///
    /// Singleton bindings return the cached instance after first
    /// construction; transient bindings construct fresh on each call.
    /// Fails with [`Error::Unbound`] for missing bindings, a provider error
    /// naming the failing token for construction failures, and
    /// [`Error::Cycle`] for circular dependencies.
    pub fn get<T>(&self, token: Token) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Resolver::root(self).get(token)
    }

    /// Resolve `token` without recovering a concrete type
    ///
    /// Used by the validator, which only needs to know whether resolution
    /// succeeds.
    pub fn resolve_raw(&self, token: Token) -> Result<Shared> {
        Resolver::root(self).resolve(token)
    }

    fn insert(&mut self, token: Token, binding: Binding) -> Result<()> {
        if self.bindings.contains_key(&token) {
            return Err(Error::conflict(token.name()));
        }
        trace!(token = token.name(), lifecycle = ?binding.lifecycle(), "bound");
        self.bindings.insert(token, binding);
        Ok(())
    }
}

/// Depth-first resolution context handed to factory closures
///
/// Tracks the in-progress token path so a provider that (directly or
/// transitively) depends on itself fails with a cycle error naming the
/// cycle instead of overflowing the stack.
pub struct Resolver<'a> {
    container: &'a Container,
    path: Vec<Token>,
}

impl<'a> Resolver<'a> {
    fn root(container: &'a Container) -> Self {
        Self {
            container,
            path: Vec::new(),
        }
    }

    /// Resolve a dependency to a value of type `T`
    pub fn get<T>(&mut self, token: Token) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let shared = self.resolve(token)?;
        downcast(token, &shared)
    }

    /// Whether `token` is bound in the underlying container
    pub fn is_bound(&self, token: Token) -> bool {
        self.container.is_bound(token)
    }

    pub(crate) fn resolve(&mut self, token: Token) -> Result<Shared> {
        let container = self.container;
        let Some(binding) = container.bindings.get(&token) else {
            return Err(Error::unbound(token.name()));
        };

        if self.path.contains(&token) {
            return Err(Error::cycle(self.render_cycle(token)));
        }

        self.path.push(token);
        let produced = binding.produce(self);
        self.path.pop();

        produced.map_err(|e| match e {
            // Container-class errors already name their own token.
            Error::Unbound { .. }
            | Error::Cycle { .. }
            | Error::Provider { .. }
            | Error::TypeMismatch { .. } => e,
            // Anything else came out of the provider's own construction
            // logic; attach the failing token's name.
            other => Error::provider(token.name(), other.to_string()),
        })
    }

    fn render_cycle(&self, token: Token) -> String {
        let mut names: Vec<&str> = self.path.iter().map(Token::name).collect();
        names.push(token.name());
        names.join(" -> ")
    }
}
