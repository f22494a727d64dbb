//! Site assembly: applications by name, compiled into the root route table.
//!
//! # Data Flow
//! ```text
//! Registry (admin → mountable endpoint, polls → nested table)
//!     + [[routes]] from SiteConfig, in order
//!     → one Binding per route (mount or include)
//!     → Arc<SiteRoutes>, built once at startup
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::RouteConfig;
use crate::http::endpoint::{Endpoint, SiteRoutes};
use crate::routing::{Binding, PatternError, RouteTable};
use crate::{admin, polls};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("unknown application '{0}'")]
    UnknownApp(String),

    #[error("application '{name}' cannot be {wanted}")]
    WrongKind { name: String, wanted: &'static str },

    #[error("route for '{prefix}' names no application")]
    NoTarget { prefix: String },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// What an application contributes to the site.
#[derive(Clone)]
pub enum Application {
    /// A handler mounted at a prefix; it dispatches the remainder itself.
    Mount(Endpoint),
    /// A route table included under a prefix.
    Include(Arc<SiteRoutes>),
}

/// Applications available to the route configuration.
#[derive(Default)]
pub struct Registry {
    apps: HashMap<String, Application>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `admin` and `polls` applications.
    pub fn with_defaults() -> Result<Self, SiteError> {
        let mut registry = Self::new();
        registry.register("admin", Application::Mount(admin::site()));
        registry.register(polls::APP_NAME, Application::Include(Arc::new(polls::urls()?)));
        Ok(registry)
    }

    pub fn register(&mut self, name: impl Into<String>, app: Application) {
        self.apps.insert(name.into(), app);
    }

    fn get(&self, name: &str) -> Result<&Application, SiteError> {
        self.apps
            .get(name)
            .ok_or_else(|| SiteError::UnknownApp(name.to_string()))
    }

    /// Compile the root table from route configuration, preserving order.
    pub fn build(&self, routes: &[RouteConfig]) -> Result<SiteRoutes, SiteError> {
        let mut bindings = Vec::with_capacity(routes.len());

        for route in routes {
            let binding = match (&route.app, &route.include) {
                (Some(name), _) => match self.get(name)? {
                    Application::Mount(endpoint) => Binding::mount(&route.prefix, endpoint.clone())?,
                    Application::Include(_) => {
                        return Err(SiteError::WrongKind {
                            name: name.clone(),
                            wanted: "mounted",
                        })
                    }
                },
                (None, Some(name)) => match self.get(name)? {
                    Application::Include(table) => Binding::include(&route.prefix, table.clone())?,
                    Application::Mount(_) => {
                        return Err(SiteError::WrongKind {
                            name: name.clone(),
                            wanted: "included",
                        })
                    }
                },
                (None, None) => {
                    return Err(SiteError::NoTarget {
                        prefix: route.prefix.clone(),
                    })
                }
            };

            let binding = match &route.name {
                Some(name) => binding.named(name.clone()),
                None => binding,
            };
            tracing::debug!(prefix = %route.prefix, "Route registered");
            bindings.push(binding);
        }

        Ok(RouteTable::new(bindings))
    }
}

/// Build the site table for `routes` using the built-in applications.
pub fn build_site(routes: &[RouteConfig]) -> Result<Arc<SiteRoutes>, SiteError> {
    let table = Registry::with_defaults()?.build(routes)?;
    tracing::info!(routes = table.bindings().len(), "Route table compiled");
    Ok(Arc::new(table))
}
