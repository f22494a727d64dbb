//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path ("polls/3/vote/")
//!     → router.rs (ordered scan of bindings)
//!     → matcher.rs (prefix / exact pattern match, typed captures)
//!     → Include? strip prefix, recurse into nested table
//!     → Return: Resolution (endpoint, remainder, params, hops) or NoMatch
//!
//! Table construction (at startup):
//!     RouteConfig[] + application registry
//!     → Parse patterns
//!     → Freeze as immutable RouteTable shared via Arc
//! ```
//!
//! # Design Decisions
//! - Tables built at startup, immutable at runtime
//! - No regex in hot path (literal prefixes and closed converter set)
//! - Deterministic: same input always matches same route
//! - First match wins (definition order)

pub mod error;
pub mod matcher;
pub mod router;

pub use error::{PatternError, RouteError};
pub use matcher::{ParamValue, Params, PathPattern};
pub use router::{Binding, Destination, Hop, Resolution, RouteEntry, RouteKind, RouteTable};
