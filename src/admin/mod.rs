//! Administration module.
//!
//! Mounted under a prefix (`admin/` on the default site) and handed whatever
//! follows it. Dispatches on that remainder itself:
//!
//! | Remainder  | Response                                  |
//! |------------|-------------------------------------------|
//! | `""`       | index: every route the site serves        |
//! | `status/`  | version and liveness                      |
//! | other      | 404 scoped to the admin module            |

pub mod handlers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http::endpoint::{Endpoint, RequestContext};

/// The admin route set as a single mountable endpoint.
pub fn site() -> Endpoint {
    Endpoint::new("admin", dispatch)
}

async fn dispatch(ctx: RequestContext) -> Response {
    match ctx.remainder.as_str() {
        "" => handlers::index(&ctx).into_response(),
        "status/" => handlers::status().into_response(),
        other => {
            tracing::debug!(request_id = %ctx.request_id, remainder = %other, "Unknown admin page");
            (StatusCode::NOT_FOUND, format!("No admin page at '{}'", other)).into_response()
        }
    }
}
