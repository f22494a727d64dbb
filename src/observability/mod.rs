//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → structured `tracing` events (request_id, path, route, endpoint)
//!     → logging.rs subscriber (pretty or JSON to stdout)
//! HTTP layer adds:
//!     → x-request-id per request, TraceLayer span per request
//! ```

pub mod logging;

pub use logging::init_logging;
