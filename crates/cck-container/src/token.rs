//! Service tokens - interned identifiers for bindings
//!
//! A [`Token`] names a service role in a `Domain.Role` namespace
//! (`"Auth.Service"`, `"Storage.Local"`). Tokens are interned: every call
//! to [`Token::intern`] with the same namespace string returns the same
//! token, so repeated lookups by name always resolve the same identifier.
//! The intern table is process-wide, populated on first use, never cleared.

use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Interned identifier naming a service role
///
/// Cheap to copy; equality and hashing use the interned id, so two tokens
/// for the same namespace compare equal no matter where they were created.
#[derive(Clone, Copy, Eq)]
pub struct Token {
    id: u32,
    name: &'static str,
}

impl Token {
    /// Intern a namespace string, returning its unique token
    ///
    /// Idempotent: `intern(s) == intern(s)` for all `s`, and distinct
    /// namespaces yield distinct tokens.
    pub fn intern(namespace: &str) -> Token {
        let table = intern_table();
        if let Some(token) = table
            .read()
            .expect("token intern table poisoned")
            .get(namespace)
        {
            return *token;
        }

        let mut table = table.write().expect("token intern table poisoned");
        // Re-check under the write lock: another caller may have interned
        // the same namespace between our read and write.
        if let Some(token) = table.get(namespace) {
            return *token;
        }
        let name: &'static str = Box::leak(namespace.to_string().into_boxed_str());
        let token = Token {
            id: u32::try_from(table.len()).expect("token id overflow") + 1,
            name,
        };
        table.insert(name, token);
        token
    }

    /// The `Domain.Role` namespace this token was interned from
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.name).finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn intern_table() -> &'static RwLock<HashMap<&'static str, Token>> {
    static TABLE: OnceLock<RwLock<HashMap<&'static str, Token>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Well-known tokens grouped by domain
///
/// The accessor functions intern on each call, which by construction always
/// returns the same token. Pattern: `tokens::{domain}::{role}()`.
pub mod wellknown {
    /// Authentication: login, logout, token refresh
    pub mod auth {
        use crate::token::Token;

        pub fn service() -> Token {
            Token::intern("Auth.Service")
        }

        pub fn token_manager() -> Token {
            Token::intern("Auth.TokenManager")
        }

        /// External SSO SDK handle supplied by the host application
        pub fn sso_handle() -> Token {
            Token::intern("Auth.SsoHandle")
        }
    }

    /// Payments: processing, gateways
    pub mod payment {
        use crate::token::Token;

        pub fn service() -> Token {
            Token::intern("Payment.Service")
        }

        pub fn gateway() -> Token {
            Token::intern("Payment.Gateway")
        }
    }

    /// Storage: local, secure, remote
    pub mod storage {
        use crate::token::Token;

        pub fn local() -> Token {
            Token::intern("Storage.Local")
        }

        pub fn secure() -> Token {
            Token::intern("Storage.Secure")
        }

        pub fn remote() -> Token {
            Token::intern("Storage.Remote")
        }
    }

    /// Analytics: event tracking
    pub mod analytics {
        use crate::token::Token;

        pub fn service() -> Token {
            Token::intern("Analytics.Service")
        }
    }

    /// User CRUD
    pub mod user {
        use crate::token::Token;

        pub fn service() -> Token {
            Token::intern("User.Service")
        }
    }

    /// HTTP transport handle
    pub mod http {
        use crate::token::Token;

        pub fn client() -> Token {
            Token::intern("Http.Client")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let a = Token::intern("Test.Interning");
        let b = Token::intern("Test.Interning");
        assert_eq!(a, b);
        assert_eq!(a.name(), "Test.Interning");
    }

    #[test]
    fn distinct_namespaces_yield_distinct_tokens() {
        let a = Token::intern("Test.DistinctA");
        let b = Token::intern("Test.DistinctB");
        assert_ne!(a, b);
    }

    #[test]
    fn wellknown_accessors_are_stable() {
        assert_eq!(wellknown::auth::service(), wellknown::auth::service());
        assert_eq!(wellknown::auth::service().name(), "Auth.Service");
        assert_ne!(wellknown::auth::service(), wellknown::http::client());
    }

    #[test]
    fn tokens_hash_by_identity() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Token::intern("Test.Hash"));
        assert!(set.contains(&Token::intern("Test.Hash")));
        assert!(!set.contains(&Token::intern("Test.HashOther")));
    }
}
