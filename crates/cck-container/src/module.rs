//! Modules - replayable binding descriptions
//!
//! A module is a named, pure description of bind/unbind/rebind operations.
//! Loading applies the description to a container through a [`Binder`],
//! which exposes only the binding surface, so modules cannot resolve services
//! during load. Applying one module to two containers produces independent,
//! non-interfering binding tables.

use std::sync::Arc;

use cck_domain::error::Result;
use tracing::debug;

use crate::binding::Lifecycle;
use crate::container::{Container, Resolver};
use crate::token::Token;

type ApplyFn = Arc<dyn Fn(&mut Binder<'_>) -> Result<()> + Send + Sync>;

/// A composable, replayable set of binding operations
#[derive(Clone)]
pub struct Module {
    name: &'static str,
    apply: ApplyFn,
}

impl Module {
    /// Define a module from a binding closure
    ///
    /// ```ignore
    /// let module = Module::new("core", |binder| {
    ///     binder.bind(tokens::auth::service(), Lifecycle::Singleton, |_| {
    ///         Ok(Arc::new(MockAuthService::new()) as Arc<dyn AuthService>)
    ///     })
    /// });
    /// ```
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut Binder<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// The module's diagnostic name
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn apply(&self, container: &mut Container) -> Result<()> {
        let mut binder = Binder { container };
        (self.apply.as_ref())(&mut binder)
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module").field("name", &self.name).finish()
    }
}

impl Container {
    /// Apply a module's binding operations to this container
    pub fn load(&mut self, module: &Module) -> Result<()> {
        debug!(module = module.name(), "loading module");
        module.apply(self)
    }
}

/// The binding surface handed to a module's closure
///
/// Mirrors the container's binding operations; resolution is deliberately
/// absent so module loads stay pure.
pub struct Binder<'a> {
    container: &'a mut Container,
}

impl Binder<'_> {
    /// Bind a factory; Conflict error if the token is already bound
    pub fn bind<T, F>(&mut self, token: Token, lifecycle: Lifecycle, factory: F) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.container.bind(token, lifecycle, factory)
    }

    /// Bind a constant value; Conflict error if the token is already bound
    pub fn bind_constant<T>(&mut self, token: Token, value: T) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.container.bind_constant(token, value)
    }

    /// Remove a binding; no-op when unbound
    pub fn unbind(&mut self, token: Token) {
        self.container.unbind(token);
    }

    /// Replace a binding (unbind-if-bound, then bind)
    pub fn rebind<T, F>(&mut self, token: Token, lifecycle: Lifecycle, factory: F) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.container.rebind(token, lifecycle, factory)
    }

    /// Replace a binding with a constant value
    pub fn rebind_constant<T>(&mut self, token: Token, value: T) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.container.rebind_constant(token, value)
    }

    /// Whether the token currently has a binding
    pub fn is_bound(&self, token: Token) -> bool {
        self.container.is_bound(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cck_domain::error::Error;

    fn token(name: &str) -> Token {
        Token::intern(name)
    }

    #[test]
    fn module_applies_bindings() {
        let module = Module::new("test-bindings", |binder| {
            binder.bind_constant(token("Mod.Value"), 5u32)
        });

        let mut container = Container::new();
        container.load(&module).unwrap();
        assert_eq!(container.get::<u32>(token("Mod.Value")).unwrap(), 5);
    }

    #[test]
    fn module_loads_are_independent_across_containers() {
        let module = Module::new("test-independent", |binder| {
            binder.bind(token("Mod.Counter"), Lifecycle::Singleton, |_| {
                Ok(std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0)))
            })
        });

        let mut first = Container::new();
        let mut second = Container::new();
        first.load(&module).unwrap();
        second.load(&module).unwrap();

        let a: std::sync::Arc<std::sync::atomic::AtomicUsize> =
            first.get(token("Mod.Counter")).unwrap();
        let b: std::sync::Arc<std::sync::atomic::AtomicUsize> =
            second.get(token("Mod.Counter")).unwrap();
        // Singleton caches are per container, never shared between loads.
        assert!(!std::sync::Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn module_bind_conflict_propagates() {
        let module = Module::new("test-conflict", |binder| {
            binder.bind_constant(token("Mod.Conflict"), 1u32)?;
            binder.bind_constant(token("Mod.Conflict"), 2u32)
        });

        let mut container = Container::new();
        let err = container.load(&module).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[test]
    fn defensive_unbind_then_bind_overrides() {
        let base = Module::new("test-base", |binder| {
            binder.bind_constant(token("Mod.Override"), "base".to_string())
        });
        let client = Module::new("test-client", |binder| {
            if binder.is_bound(token("Mod.Override")) {
                binder.unbind(token("Mod.Override"));
            }
            binder.bind_constant(token("Mod.Override"), "client".to_string())
        });

        let mut container = Container::new();
        container.load(&base).unwrap();
        container.load(&client).unwrap();

        let value: String = container.get(token("Mod.Override")).unwrap();
        assert_eq!(value, "client");
    }
}
