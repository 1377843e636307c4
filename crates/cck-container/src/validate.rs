//! Container validation
//!
//! Checks an assembled container against an explicit list of required
//! services. [`validate`] reports, [`assert_valid`] raises. Every required
//! token is checked regardless of earlier failures so startup diagnostics
//! are complete in one pass.

use cck_domain::error::{Error, Result};

use crate::container::Container;
use crate::token::{wellknown, Token};

/// A token the application cannot run without, plus its diagnostic label
#[derive(Debug, Clone, Copy)]
pub struct RequiredService {
    pub token: Token,
    pub label: &'static str,
}

impl RequiredService {
    pub fn new(token: Token, label: &'static str) -> Self {
        Self { token, label }
    }
}

/// Services that must be bound for the application to work
///
/// The default composition options use this list; callers with different
/// requirements supply their own.
pub fn default_required() -> Vec<RequiredService> {
    vec![
        RequiredService::new(wellknown::auth::service(), "Auth.Service"),
        RequiredService::new(wellknown::http::client(), "Http.Client"),
    ]
}

/// Outcome of a validation pass, produced fresh on every call
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    /// Labels of required tokens with no binding
    pub missing: Vec<String>,
    /// "label: message" entries for bound tokens that failed to resolve
    pub errors: Vec<String>,
}

/// Check the container against the required-service list; never fails
///
/// The container is read, never mutated. A resolution failure on one token
/// does not abort the loop: all required tokens are checked.
pub fn validate(container: &Container, required: &[RequiredService]) -> ValidationResult {
    let mut missing = Vec::new();
    let mut errors = Vec::new();

    for service in required {
        if !container.is_bound(service.token) {
            missing.push(service.label.to_string());
        } else if let Err(error) = container.resolve_raw(service.token) {
            errors.push(format!("{}: {}", service.label, error));
        }
    }

    ValidationResult {
        valid: missing.is_empty() && errors.is_empty(),
        missing,
        errors,
    }
}

/// Fail with an aggregated [`Error::Validation`] if the container is invalid
///
/// The error message enumerates every missing and erroring required token,
/// not just the first.
pub fn assert_valid(container: &Container, required: &[RequiredService]) -> Result<()> {
    let result = validate(container, required);
    if result.valid {
        Ok(())
    } else {
        Err(Error::Validation {
            missing: result.missing,
            errors: result.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Lifecycle;
    use crate::token::Token;

    fn token(name: &str) -> Token {
        Token::intern(name)
    }

    #[test]
    fn complete_diagnostics_in_one_pass() {
        // X bound and healthy, Y bound but failing, Z unbound.
        let mut container = Container::new();
        container.bind_constant(token("Val.X"), 1u32).unwrap();
        container
            .bind::<u32, _>(token("Val.Y"), Lifecycle::Singleton, |_| {
                Err(Error::network("y exploded"))
            })
            .unwrap();

        let required = [
            RequiredService::new(token("Val.X"), "Val.X"),
            RequiredService::new(token("Val.Y"), "Val.Y"),
            RequiredService::new(token("Val.Z"), "Val.Z"),
        ];
        let result = validate(&container, &required);

        assert!(!result.valid);
        assert_eq!(result.missing, vec!["Val.Z".to_string()]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Val.Y: "));
    }

    #[test]
    fn valid_container_passes() {
        let mut container = Container::new();
        container.bind_constant(token("Val.Ok"), 1u32).unwrap();

        let required = [RequiredService::new(token("Val.Ok"), "Val.Ok")];
        let result = validate(&container, &required);
        assert!(result.valid);
        assert!(result.missing.is_empty());
        assert!(result.errors.is_empty());

        assert_valid(&container, &required).unwrap();
    }

    #[test]
    fn assert_valid_enumerates_every_problem() {
        let container = Container::new();
        let required = [
            RequiredService::new(token("Val.MissingA"), "Val.MissingA"),
            RequiredService::new(token("Val.MissingB"), "Val.MissingB"),
        ];

        let err = assert_valid(&container, &required).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Missing: Val.MissingA"));
        assert!(message.contains("Missing: Val.MissingB"));
    }

    #[test]
    fn default_required_names_auth_and_http() {
        let labels: Vec<&str> = default_required().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Auth.Service", "Http.Client"]);
    }
}
