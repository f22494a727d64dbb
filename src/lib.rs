//! URL dispatch for a small site.
//!
//! An ordered table of `(prefix, destination)` bindings maps request paths to
//! an administration module and to the `polls` application's own table.
//!
//! ```text
//!     "admin/login/"   ──▶ admin (mounted)          remainder "login/"
//!     "polls/3/vote/"  ──▶ polls (included)  ──▶ "3/vote/" ──▶ polls:vote {question_id: 3}
//!     "unknown/"       ──▶ NoMatch ──▶ 404
//! ```

pub mod config;
pub mod http;
pub mod routing;
pub mod site;

// Applications
pub mod admin;
pub mod polls;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteError, RouteTable};
pub use site::build_site;
