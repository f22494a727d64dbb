//! Routing errors.

use thiserror::Error;

/// Failure to resolve or reverse a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No binding matched the path. Surfaced by the host as a 404.
    #[error("no matching route for '{path}' (tried: {})", tried.join(", "))]
    NoMatch { path: String, tried: Vec<String> },

    /// No named route could produce a path for the given parameters.
    #[error("no reverse match for '{name}'")]
    NoReverseMatch { name: String },
}

/// A route pattern that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unterminated '<' in pattern '{pattern}'")]
    Unterminated { pattern: String },

    #[error("unknown converter '{converter}' in pattern '{pattern}'")]
    UnknownConverter { pattern: String, converter: String },

    #[error("invalid parameter name '{name}' in pattern '{pattern}'")]
    InvalidName { pattern: String, name: String },

    #[error("parameter '{name}' appears twice in pattern '{pattern}'")]
    DuplicateParam { pattern: String, name: String },
}
