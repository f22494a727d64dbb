//! Admin pages: site route index and status.

use axum::Json;
use serde::Serialize;

use crate::http::endpoint::RequestContext;
use crate::routing::RouteKind;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct RouteRow {
    pub pattern: String,
    pub name: Option<String>,
    pub kind: &'static str,
}

#[derive(Serialize)]
pub struct AdminIndex {
    pub routes: Vec<RouteRow>,
}

pub fn status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub fn index(ctx: &RequestContext) -> Json<AdminIndex> {
    let routes = ctx
        .site
        .routes()
        .into_iter()
        .map(|r| RouteRow {
            pattern: r.pattern,
            name: r.name,
            kind: match r.kind {
                RouteKind::Mount => "mount",
                RouteKind::Exact => "exact",
            },
        })
        .collect();

    Json(AdminIndex { routes })
}
