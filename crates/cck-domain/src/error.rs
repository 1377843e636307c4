//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Client Composition Kit
///
/// The container variants (`Conflict`, `Unbound`, `Cycle`, `Provider`,
/// `TypeMismatch`) indicate programming errors in module wiring and surface
/// immediately from `bind`/`get`. `Validation` aggregates every problem
/// found in one pass so startup diagnostics are complete. `UnknownSelector`
/// is recoverable by default; the composition policy decides whether it is
/// fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// Binding an already-bound token without unbinding it first
    #[error("token already bound: {token}")]
    Conflict {
        /// Namespace of the conflicting token
        token: String,
    },

    /// Resolving a token with no active binding
    #[error("no binding for token: {token}")]
    Unbound {
        /// Namespace of the unbound token
        token: String,
    },

    /// Circular provider dependency detected during resolution
    #[error("circular dependency: {path}")]
    Cycle {
        /// The cycle, rendered as "A -> B -> A"
        path: String,
    },

    /// A provider's own construction logic failed
    #[error("provider for {token} failed: {message}")]
    Provider {
        /// Namespace of the token whose provider failed
        token: String,
        /// Description of the construction failure
        message: String,
    },

    /// A bound value is not of the requested type
    #[error("binding for {token} is not a {expected}")]
    TypeMismatch {
        /// Namespace of the mistyped token
        token: String,
        /// The type the caller asked for
        expected: &'static str,
    },

    /// Aggregated validation failure: every missing and erroring required
    /// token, never just the first
    #[error("container validation failed:\n{}", validation_lines(.missing, .errors))]
    Validation {
        /// Required tokens with no binding
        missing: Vec<String>,
        /// "label: message" entries for bound tokens that failed to resolve
        errors: Vec<String>,
    },

    /// A client id or preset name that no loader was registered for
    #[error("unknown {kind}: {id}")]
    UnknownSelector {
        /// Selector kind ("client" or "preset")
        kind: &'static str,
        /// The unresolved identifier
        id: String,
    },

    /// Invalid selector combination passed to composition
    #[error("invalid selection: {message}")]
    Selection {
        /// Description of the conflicting options
        message: String,
    },

    /// Resolution attempted with no active container scope
    #[error("no active container scope")]
    ScopeMissing,

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn validation_lines(missing: &[String], errors: &[String]) -> String {
    let mut lines: Vec<String> = missing.iter().map(|name| format!("Missing: {name}")).collect();
    lines.extend(errors.iter().cloned());
    lines.join("\n")
}

// Container error creation methods
impl Error {
    /// Create a conflict error for an already-bound token
    pub fn conflict<S: Into<String>>(token: S) -> Self {
        Self::Conflict {
            token: token.into(),
        }
    }

    /// Create an unbound-token error
    pub fn unbound<S: Into<String>>(token: S) -> Self {
        Self::Unbound {
            token: token.into(),
        }
    }

    /// Create a cycle error from an already-rendered dependency path
    pub fn cycle<S: Into<String>>(path: S) -> Self {
        Self::Cycle { path: path.into() }
    }

    /// Create a provider construction error for the given token
    pub fn provider<S: Into<String>, M: Into<String>>(token: S, message: M) -> Self {
        Self::Provider {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create a type mismatch error for the given token
    pub fn type_mismatch<S: Into<String>>(token: S, expected: &'static str) -> Self {
        Self::TypeMismatch {
            token: token.into(),
            expected,
        }
    }
}

// Composition error creation methods
impl Error {
    /// Create an unknown-selector error
    pub fn unknown_selector<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Self::UnknownSelector {
            kind,
            id: id.into(),
        }
    }

    /// Create a selection error for conflicting composition options
    pub fn selection<S: Into<String>>(message: S) -> Self {
        Self::Selection {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_enumerates_every_problem() {
        let err = Error::Validation {
            missing: vec!["Http.Client".to_string(), "Storage.Local".to_string()],
            errors: vec!["Auth.Service: provider for Auth.Service failed: boom".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("Missing: Http.Client"));
        assert!(message.contains("Missing: Storage.Local"));
        assert!(message.contains("Auth.Service: provider"));
    }

    #[test]
    fn cycle_error_carries_rendered_path() {
        let err = Error::cycle("A -> B -> A");
        assert_eq!(err.to_string(), "circular dependency: A -> B -> A");
    }

    #[test]
    fn unknown_selector_names_the_id() {
        let err = Error::unknown_selector("client", "acme");
        assert_eq!(err.to_string(), "unknown client: acme");
    }
}
