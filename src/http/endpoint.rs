//! Endpoints: what a route table hands requests to.
//!
//! # Responsibilities
//! - Define the handler seam between the route table and the HTTP host
//! - Carry the resolution results (remainder, params, route name) into handlers
//!
//! # Design Decisions
//! - Handlers are type-erased (`Arc<dyn Handler>`) so one table can hold any mix
//! - Any `Fn(RequestContext) -> impl Future<Output = Response>` is a handler

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::routing::{Params, RouteTable};

/// The site's route table, as served.
pub type SiteRoutes = RouteTable<Endpoint>;

/// Everything a handler learns about the request it was chosen for.
#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub method: Method,
    /// Full request path, leading slash stripped.
    pub path: String,
    /// Unconsumed part of the path (non-empty only for mounted endpoints).
    pub remainder: String,
    pub params: Params,
    /// Qualified route name, e.g. `polls:detail`.
    pub route_name: Option<String>,
    /// The whole site table, for handlers that list or reverse routes.
    pub site: Arc<SiteRoutes>,
}

impl RequestContext {
    /// Look up a captured parameter rendered as text.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params.get(name).map(ToString::to_string)
    }
}

/// Something that turns a resolved request into a response.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
        Box::pin((self)(ctx))
    }
}

/// A named handler stored in a route table.
#[derive(Clone)]
pub struct Endpoint {
    name: &'static str,
    handler: Arc<dyn Handler>,
}

impl Endpoint {
    pub fn new(name: &'static str, handler: impl Handler) -> Self {
        Self {
            name,
            handler: Arc::new(handler),
        }
    }

    /// Identifies the view in logs, e.g. `polls.detail`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
        self.handler.call(ctx)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("name", &self.name).finish()
    }
}
