//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive)
//! - Match path suffix against a list (case-sensitive)
//! - Match request method, optionally negated
//!
//! # Design Decisions
//! - Path matching works on the raw URI path, query excluded
//! - An empty prefix never matches, so an unset proxy route cannot swallow everything
//! - Suffix matching is plain `ends_with`, not extension parsing

use axum::body::Body;
use axum::http::{Method, Request};

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        !self.prefix.is_empty() && req.uri().path().starts_with(&self.prefix)
    }
}

/// Matches when the request path ends with any of the given suffixes.
#[derive(Debug, Clone)]
pub struct PathSuffixMatcher {
    suffixes: Vec<String>,
}

impl PathSuffixMatcher {
    pub fn new(suffixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for PathSuffixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        let path = req.uri().path();
        self.suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && path.ends_with(suffix.as_str()))
    }
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
    negate: bool,
}

impl MethodMatcher {
    /// Matches only `method`.
    pub fn new(method: Method) -> Self {
        Self { method, negate: false }
    }

    /// Matches every method except `method`.
    pub fn other_than(method: Method) -> Self {
        Self { method, negate: true }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        (req.method() == self.method) != self.negate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::default())
            .unwrap()
    }

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches(&request(Method::GET, "http://example.com/api/v1")));
        assert!(matcher.matches(&request(Method::POST, "/api")));
        assert!(matcher.matches(&request(Method::GET, "/apiary")));
        assert!(!matcher.matches(&request(Method::GET, "/images")));
        assert!(!matcher.matches(&request(Method::GET, "/v1/api")));
    }

    #[test]
    fn test_empty_prefix_never_matches() {
        let matcher = PathPrefixMatcher::new("");
        assert!(!matcher.matches(&request(Method::GET, "/")));
        assert!(!matcher.matches(&request(Method::GET, "/api")));
    }

    #[test]
    fn test_path_suffix_matcher() {
        let matcher = PathSuffixMatcher::new([".css", ".js"]);

        assert!(matcher.matches(&request(Method::GET, "/cart/cart.css")));
        assert!(matcher.matches(&request(Method::GET, "/vendor/app.min.js?v=2")));
        assert!(!matcher.matches(&request(Method::GET, "/cart/cart.CSS")));
        assert!(!matcher.matches(&request(Method::GET, "/cart/cart.js.map")));
        assert!(!matcher.matches(&request(Method::GET, "/cart")));
    }

    #[test]
    fn test_method_matcher() {
        let get = MethodMatcher::new(Method::GET);
        let not_get = MethodMatcher::other_than(Method::GET);

        assert!(get.matches(&request(Method::GET, "/")));
        assert!(!get.matches(&request(Method::POST, "/")));
        assert!(!not_get.matches(&request(Method::GET, "/")));
        assert!(not_get.matches(&request(Method::HEAD, "/")));
        assert!(not_get.matches(&request(Method::DELETE, "/")));
    }
}
