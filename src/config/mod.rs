//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → routes compiled once into the site table
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload (the route table never changes)
//! - All fields have defaults so an empty file yields the stock site
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RouteConfig, SiteConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
