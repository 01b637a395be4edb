//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in priority order
//! - Classify each request into exactly one handling path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over a handful of routes
//! - The entry document is the explicit fallback, never a silent default

use axum::body::Body;
use axum::http::{Method, Request};

use crate::config::ServerConfig;
use crate::routing::matcher::{Matcher, MethodMatcher, PathPrefixMatcher, PathSuffixMatcher};

/// How a request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Forward to the reverse-proxy backend.
    Proxy,
    /// Reject with 404.
    NotFound,
    /// Serve a file from the root directory as-is.
    StaticFile,
    /// Serve `index.html` with discovered tags injected.
    EntryDocument,
}

impl Route {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Proxy => "proxy",
            Route::NotFound => "not_found",
            Route::StaticFile => "static",
            Route::EntryDocument => "entry",
        }
    }
}

/// Ordered route table; first match wins.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<(Box<dyn Matcher>, Route)>,
}

impl RouteTable {
    /// Compile the route table for a resolved configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let routes: Vec<(Box<dyn Matcher>, Route)> = vec![
            (
                Box::new(PathPrefixMatcher::new(config.reverse_proxy_route.clone())),
                Route::Proxy,
            ),
            (Box::new(MethodMatcher::other_than(Method::GET)), Route::NotFound),
            (
                Box::new(PathSuffixMatcher::new(config.static_file_extensions.iter().cloned())),
                Route::StaticFile,
            ),
        ];
        Self { routes }
    }

    /// Classify a request.
    pub fn classify(&self, req: &Request<Body>) -> Route {
        self.routes
            .iter()
            .find(|(matcher, _)| matcher.matches(req))
            .map(|(_, route)| *route)
            .unwrap_or(Route::EntryDocument)
    }
}
