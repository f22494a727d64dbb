//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → routing (resolve path against the site table)
//!     → endpoint.rs (invoke the chosen handler)
//!     → Send to client (404 when nothing matched)
//! ```

pub mod endpoint;
pub mod request;
pub mod server;

pub use endpoint::{Endpoint, Handler, RequestContext, SiteRoutes};
pub use request::{route_path, MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
