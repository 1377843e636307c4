//! Scoped container access - the presentation boundary
//!
//! The presentation layer resolves services without threading the container
//! through every call site: [`enter`] installs a composed container as the
//! current scope for the duration of a guard, and [`resolve`] fetches a
//! service from whichever scope is active. Resolution outside any scope is
//! a [`ScopeMissing`](cck_domain::Error::ScopeMissing) error the caller's
//! error boundary can render.
//!
//! Scopes nest: entering a second scope shadows the first until the inner
//! guard drops. The stack is thread-scoped, matching the single-threaded
//! cooperative model of the presentation layer.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use cck_domain::error::{Error, Result};

use crate::container::Container;
use crate::token::Token;

thread_local! {
    static ACTIVE: RefCell<Vec<Arc<Container>>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard for an active container scope
///
/// Restores the previously active scope (if any) on drop. Deliberately
/// `!Send`: a scope belongs to the thread that entered it.
pub struct ScopeGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Install `container` as the current scope until the guard drops
pub fn enter(container: Arc<Container>) -> ScopeGuard {
    ACTIVE.with(|stack| stack.borrow_mut().push(container));
    ScopeGuard {
        _not_send: PhantomData,
    }
}

/// The currently scoped container
pub fn current() -> Result<Arc<Container>> {
    ACTIVE.with(|stack| stack.borrow().last().cloned().ok_or(Error::ScopeMissing))
}

/// Resolve a service from the current scope
pub fn resolve<T>(token: Token) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    current()?.get(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_with(name: &str, value: u32) -> Arc<Container> {
        let mut container = Container::new();
        container.bind_constant(Token::intern(name), value).unwrap();
        Arc::new(container)
    }

    #[test]
    fn resolve_outside_scope_fails() {
        let err = resolve::<u32>(Token::intern("Scope.Nothing")).unwrap_err();
        assert!(matches!(err, Error::ScopeMissing));
    }

    #[test]
    fn resolve_within_scope_succeeds() {
        let container = container_with("Scope.Value", 7);
        let _guard = enter(container);

        assert_eq!(resolve::<u32>(Token::intern("Scope.Value")).unwrap(), 7);
    }

    #[test]
    fn scopes_nest_and_restore() {
        let outer = container_with("Scope.Nested", 1);
        let inner = container_with("Scope.Nested", 2);

        let _outer_guard = enter(outer);
        assert_eq!(resolve::<u32>(Token::intern("Scope.Nested")).unwrap(), 1);

        {
            let _inner_guard = enter(inner);
            assert_eq!(resolve::<u32>(Token::intern("Scope.Nested")).unwrap(), 2);
        }

        // Inner guard dropped; the outer scope is active again.
        assert_eq!(resolve::<u32>(Token::intern("Scope.Nested")).unwrap(), 1);
    }

    #[test]
    fn current_returns_the_scoped_container() {
        let container = container_with("Scope.Current", 3);
        let _guard = enter(container.clone());

        let active = current().unwrap();
        assert!(Arc::ptr_eq(&active, &container));
    }
}
