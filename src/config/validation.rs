//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route prefixes are well-formed relative paths
//! - Keep root prefixes literal (no `<converter:name>` placeholders)
//! - Check each route names exactly one target
//! - Detect duplicate prefixes (the later one could never match)
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Whether a named application exists is checked when the site is built

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SiteConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index}: prefix is empty")]
    EmptyPrefix { index: usize },

    #[error("route #{index}: prefix '{prefix}' must not start with '/'")]
    LeadingSlash { index: usize, prefix: String },

    #[error("route #{index}: prefix '{prefix}' must end with '/'")]
    MissingTrailingSlash { index: usize, prefix: String },

    #[error("route #{index}: prefix '{prefix}' must be literal text, placeholders are not allowed")]
    PlaceholderInPrefix { index: usize, prefix: String },

    #[error("route #{index}: set exactly one of 'app' or 'include'")]
    AmbiguousTarget { index: usize },

    #[error("route #{index}: prefix '{prefix}' is already bound")]
    DuplicatePrefix { index: usize, prefix: String },

    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        let prefix = route.prefix.as_str();

        if prefix.is_empty() {
            errors.push(ValidationError::EmptyPrefix { index });
        } else {
            if prefix.starts_with('/') {
                errors.push(ValidationError::LeadingSlash {
                    index,
                    prefix: prefix.to_string(),
                });
            }
            if !prefix.ends_with('/') {
                errors.push(ValidationError::MissingTrailingSlash {
                    index,
                    prefix: prefix.to_string(),
                });
            }
            if prefix.contains(['<', '>']) {
                errors.push(ValidationError::PlaceholderInPrefix {
                    index,
                    prefix: prefix.to_string(),
                });
            }
        }

        if route.app.is_some() == route.include.is_some() {
            errors.push(ValidationError::AmbiguousTarget { index });
        }

        if !seen.insert(prefix) {
            errors.push(ValidationError::DuplicatePrefix {
                index,
                prefix: prefix.to_string(),
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
