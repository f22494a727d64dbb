//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Root route table, in match order.
    pub routes: RouteList,
}

/// Ordered root bindings. Defaults to `admin/` then `polls/`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RouteList(pub Vec<RouteConfig>);

impl Default for RouteList {
    fn default() -> Self {
        Self(vec![
            RouteConfig {
                prefix: "admin/".to_string(),
                app: Some("admin".to_string()),
                include: None,
                name: Some("admin".to_string()),
            },
            RouteConfig {
                prefix: "polls/".to_string(),
                app: None,
                include: Some("polls".to_string()),
                name: None,
            },
        ])
    }
}

impl std::ops::Deref for RouteList {
    type Target = [RouteConfig];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// One root binding.
///
/// Exactly one of `app` (mount a handler, it receives the remainder) or
/// `include` (delegate to the application's nested table) must be set.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path prefix, relative, ending in `/` (e.g. "polls/").
    pub prefix: String,

    /// Application mounted at the prefix.
    #[serde(default)]
    pub app: Option<String>,

    /// Application whose route table is included under the prefix.
    #[serde(default)]
    pub include: Option<String>,

    /// Name for reversing a mounted route.
    #[serde(default)]
    pub name: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// `pretty` for development, `json` for production.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "urlconf=info,tower_http=debug".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
