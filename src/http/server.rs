//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router: every path goes to one dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Percent-decode each request path and resolve it against the site table
//! - Invoke the resolved endpoint, or answer 404 when nothing matched
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SiteConfig;
use crate::http::endpoint::{RequestContext, SiteRoutes};
use crate::http::request::{request_id, route_path, MakeRequestUuid};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<SiteRoutes>,
}

/// HTTP host for a site route table.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that dispatches through `routes`.
    pub fn new(config: SiteConfig, routes: Arc<SiteRoutes>) -> Self {
        let state = AppState { routes };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled Axum router, for embedding or in-process tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolves the request path and hands the request to the matched endpoint.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers());
    let method = request.method().clone();
    let Some(path) = route_path(request.uri().path()) else {
        tracing::warn!(request_id = %request_id, raw_path = %request.uri().path(), "Path is not valid UTF-8");
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    let (endpoint, ctx) = match state.routes.resolve(&path) {
        Ok(resolution) => {
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                route = %resolution.route,
                endpoint = resolution.endpoint.name(),
                "Route matched"
            );
            let ctx = RequestContext {
                request_id: request_id.clone(),
                method,
                path: path.clone(),
                remainder: resolution.remainder,
                params: resolution.params,
                route_name: resolution.name,
                site: state.routes.clone(),
            };
            (resolution.endpoint.clone(), ctx)
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, path = %path, error = %e, "No route matched");
            return (StatusCode::NOT_FOUND, "No matching route found").into_response();
        }
    };

    let response = endpoint.call(ctx).await;
    tracing::debug!(
        request_id = %request_id,
        endpoint = endpoint.name(),
        status = response.status().as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::build_site;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = SiteConfig::default();
        let site = build_site(&config.routes).unwrap();
        HttpServer::new(config, site).into_router()
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_dispatch_decodes_path() {
        let (status, body) = get("/polls/%33/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "You're looking at question 3.");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_404() {
        let (status, _) = get("/polls/%FF/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_int_overflow_is_404() {
        let uri = format!("/polls/{}0/", u128::MAX);
        let (status, _) = get(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get("/polls/99999999999999999999/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "You're looking at question 99999999999999999999.");
    }
}
