//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing)
//! - Classify each request and hand it to the proxy, static or entry path
//! - Serve on a listener until shutdown
//!
//! # Design Decisions
//! - One handler for every path and method; the route table decides
//! - Entry documents are rebuilt per request on the blocking pool
//! - The status line is chosen only once the whole body is ready

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::html::build_entry_document;
use crate::http::error::ServeError;
use crate::http::proxy::ReverseProxy;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::static_files;
use crate::observability::metrics;
use crate::routing::{Route, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub routes: Arc<RouteTable>,
    pub proxy: ReverseProxy,
}

/// Development HTTP server.
pub struct DevServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl DevServer {
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            routes: Arc::new(RouteTable::from_config(&config)),
            proxy: ReverseProxy::new(config.reverse_proxy_url.clone()),
            config: config.clone(),
        };

        Self {
            router: Self::build_router(state),
            config,
        }
    }

    fn build_router(state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::debug_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id(request),
                    )
                }),
            )
            .layer(propagate_request_id_layer());

        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root = %self.config.root_dir.display(),
            proxy_route = %self.config.reverse_proxy_route,
            proxy_url = %self.config.reverse_proxy_url,
            "HTTP server starting"
        );

        axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Entry point for every request.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let route = state.routes.classify(&request);
    let path = request.uri().path().to_string();

    tracing::debug!(route = route.as_str(), path = %path, "Dispatching request");

    let result = match route {
        Route::Proxy => state.proxy.forward(request).await,
        Route::NotFound => Err(ServeError::NotFound),
        Route::StaticFile => static_files::serve_file(&state.config.root_dir, &path).await,
        Route::EntryDocument => serve_entry_document(state.config.clone()).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!(route = route.as_str(), path = %path, error = %e, "Request failed");
            } else {
                tracing::debug!(route = route.as_str(), path = %path, error = %e, "Request rejected");
            }
            e.into_response()
        }
    };

    metrics::record_request(route.as_str(), response.status().as_u16(), start);
    response
}

async fn serve_entry_document(config: Arc<ServerConfig>) -> Result<Response, ServeError> {
    let body = tokio::task::spawn_blocking(move || build_entry_document(&config))
        .await
        .map_err(|e| ServeError::Internal(e.to_string()))??;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}
