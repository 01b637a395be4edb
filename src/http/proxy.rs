//! Reverse proxy to the backend process.
//!
//! # Responsibilities
//! - Rewrite the request URI onto the configured target
//! - Strip hop-by-hop headers in both directions
//! - Stream request and response bodies without buffering
//! - Record the client address in `X-Forwarded-For`
//!
//! # Design Decisions
//! - Any method is forwarded
//! - http and https targets share one client; the target URL picks the scheme
//! - Backend status, headers and body pass through untouched
//! - Transport failures become 502 Bad Gateway

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::uri::{Authority, PathAndQuery, Scheme, Uri};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Version};
use axum::response::Response;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::http::error::ServeError;
use crate::http::request::request_id;

static HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Single-target reverse proxy.
#[derive(Clone)]
pub struct ReverseProxy {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    target: Url,
}

impl ReverseProxy {
    pub fn new(target: Url) -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client, target }
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Forward `request` and hand back the backend's response.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ServeError> {
        let request_id = request_id(&request).to_string();
        let (mut parts, body) = request.into_parts();

        let uri = self
            .target_uri(&parts.uri)
            .map_err(|e| ServeError::Internal(format!("failed to build upstream URI: {}", e)))?;

        let original_host = parts.headers.remove(header::HOST);
        strip_hop_by_hop(&mut parts.headers);
        if let Some(authority) = uri.authority() {
            let host = HeaderValue::from_str(authority.as_str())
                .map_err(|e| ServeError::Internal(format!("invalid upstream host: {}", e)))?;
            parts.headers.insert(header::HOST, host);
        }
        if let Some(host) = original_host {
            parts.headers.insert(X_FORWARDED_HOST, host);
        }
        if let Some(ConnectInfo(client)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            append_forwarded_for(&mut parts.headers, client)
                .map_err(|e| ServeError::Internal(format!("invalid forwarded header: {}", e)))?;
        }

        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            upstream = %uri,
            "Forwarding request"
        );

        parts.uri = uri;
        parts.version = Version::HTTP_11;
        let upstream_request = Request::from_parts(parts, body);

        match self.client.request(upstream_request).await {
            Ok(response) => {
                let (mut parts, body) = response.into_parts();
                strip_hop_by_hop(&mut parts.headers);
                Ok(Response::from_parts(parts, Body::new(body)))
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Upstream error");
                Err(ServeError::Upstream(e.to_string()))
            }
        }
    }

    /// Rewrite `original` onto the target: scheme and authority replaced,
    /// target path joined with the request path, queries merged.
    pub fn target_uri(&self, original: &Uri) -> Result<Uri, axum::http::Error> {
        let authority = &self.target[url::Position::BeforeHost..url::Position::AfterPort];
        let path = join_paths(self.target.path(), original.path());

        let query = match (self.target.query().unwrap_or(""), original.query().unwrap_or("")) {
            ("", "") => None,
            (target, "") => Some(target.to_string()),
            ("", request) => Some(request.to_string()),
            (target, request) => Some(format!("{}&{}", target, request)),
        };
        let path_and_query = match query {
            Some(q) => format!("{}?{}", path, q),
            None => path,
        };

        let scheme = match self.target.scheme() {
            "https" => Scheme::HTTPS,
            _ => Scheme::HTTP,
        };

        Uri::builder()
            .scheme(scheme)
            .authority(Authority::try_from(authority)?)
            .path_and_query(PathAndQuery::try_from(path_and_query)?)
            .build()
    }
}

fn join_paths(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

/// Add the client IP to any `X-Forwarded-For` chain already on the request.
fn append_forwarded_for(
    headers: &mut HeaderMap,
    client: &SocketAddr,
) -> Result<(), axum::http::header::InvalidHeaderValue> {
    let mut chain: Vec<String> = headers
        .get_all(&X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();
    chain.push(client.ip().to_string());

    headers.insert(X_FORWARDED_FOR, HeaderValue::from_str(&chain.join(", "))?);
    Ok(())
}

/// Remove connection-scoped headers, including any named in `Connection`.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::try_from(name.trim()).ok())
        .collect();

    for name in named.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_proxy(target: &str) -> ReverseProxy {
        ReverseProxy::new(Url::parse(target).unwrap())
    }

    #[test]
    fn test_target_uri() {
        let proxy = make_proxy("http://localhost:3000");
        let uri = proxy.target_uri(&"/api/hello?x=1".parse().unwrap()).unwrap();
        assert_eq!(uri.to_string(), "http://localhost:3000/api/hello?x=1");
    }

    #[test]
    fn test_target_uri_with_base_path_and_query() {
        let proxy = make_proxy("http://127.0.0.1:4040/v1?key=abc");
        let uri = proxy.target_uri(&"/api/hello?x=1".parse().unwrap()).unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:4040/v1/api/hello?key=abc&x=1");

        let proxy = make_proxy("http://backend/v1/");
        let uri = proxy.target_uri(&"/api".parse().unwrap()).unwrap();
        assert_eq!(uri.to_string(), "http://backend/v1/api");
    }

    #[test]
    fn test_target_uri_keeps_https() {
        let proxy = make_proxy("https://staging.example");
        let uri = proxy.target_uri(&"/api/x?page=2".parse().unwrap()).unwrap();
        assert_eq!(uri.to_string(), "https://staging.example/api/x?page=2");
        assert_eq!(uri.scheme(), Some(&Scheme::HTTPS));

        let proxy = make_proxy("https://staging.example:8443/base");
        let uri = proxy.target_uri(&"/api/x".parse().unwrap()).unwrap();
        assert_eq!(uri.to_string(), "https://staging.example:8443/base/api/x");
    }

    #[test]
    fn test_append_forwarded_for() {
        let client: SocketAddr = "192.0.2.10:5555".parse().unwrap();

        let mut headers = HeaderMap::new();
        append_forwarded_for(&mut headers, &client).unwrap();
        assert_eq!(headers[&X_FORWARDED_FOR], "192.0.2.10");

        let mut headers = HeaderMap::new();
        headers.append(&X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.7"));
        headers.append(&X_FORWARDED_FOR, HeaderValue::from_static("198.51.100.1"));
        append_forwarded_for(&mut headers, &client).unwrap();
        assert_eq!(
            headers[&X_FORWARDED_FOR],
            "203.0.113.7, 198.51.100.1, 192.0.2.10"
        );
        assert_eq!(headers.get_all(&X_FORWARDED_FOR).iter().count(), 1);
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("/", "/api"), "/api");
        assert_eq!(join_paths("/v1", "/api"), "/v1/api");
        assert_eq!(join_paths("/v1/", "api"), "/v1/api");
        assert_eq!(join_paths("/v1", "api"), "/v1/api");
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-custom"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("x-custom", HeaderValue::from_static("1"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));

        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[header::ACCEPT], "*/*");
    }
}
