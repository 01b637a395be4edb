//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    Router,
};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use spago_dev_server::config::{load_raw_config, resolve_config, RawConfig, CONFIG_FILE_NAME};
use spago_dev_server::DevServer;

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Example Project</title>
  </head>
  <body>
    <div class="app"></div>
  </body>
</html>
"#;

/// A throwaway project root.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::Builder::new()
                .prefix("spago-")
                .tempdir()
                .expect("failed to create a temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.path().join(rel)).expect("failed to create dir");
    }

    pub fn add_file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, content).expect("failed to add file");
    }

    pub fn remove_file(&self, rel: &str) {
        fs::remove_file(self.path().join(rel)).expect("failed to remove file");
    }

    pub fn add_config(&self, config: &RawConfig) {
        let json = serde_json::to_string(config).expect("failed to serialize config");
        self.add_file(CONFIG_FILE_NAME, &json);
    }

    /// Files every dependency test starts from.
    pub fn add_cart_and_user(&self) {
        self.add_file("cart/cart.css", ".cart { border: 1px solid #666; }");
        self.add_file("cart/cart.js", "window.cart = { total: 0 };");
        self.add_file("user/user.css", ".user { color: red; }");
        self.add_file("user/user.js", "window.user = { id: 'AE829X81PPD6' };");
    }

    /// Build a server the way the binary does: config file, then resolution.
    pub fn server(&self) -> DevServer {
        let raw = load_raw_config(&self.path().join(CONFIG_FILE_NAME)).expect("failed to load config");
        DevServer::new(resolve_config(self.path(), raw).expect("failed to create server"))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Drive one request through the router without a socket.
pub async fn send(router: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .expect("failed to create http request");

    send_request(router, request).await
}

/// GET `uri` as if it arrived over a connection from `client`.
pub async fn get_from(
    router: &Router,
    uri: &str,
    client: SocketAddr,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut request = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let mut request = request
        .body(Body::empty())
        .expect("failed to create http request");
    request.extensions_mut().insert(ConnectInfo(client));

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    send(router, Method::GET, uri, "").await
}

/// Assert status and exact body of a GET.
pub async fn get_eq(router: &Router, uri: &str, status: u16, body: &str) {
    let response = get(router, uri).await;
    assert_eq!(response.status.as_u16(), status, "status for {uri}, body: {}", response.body);
    assert_eq!(response.body, body, "body for {uri}");
}

/// Start a backend that greets with the request path and echoes request
/// details in `x-backend-*` headers.
pub async fn start_api_backend() -> SocketAddr {
    async fn greet(method: Method, uri: Uri, headers: HeaderMap, body: String) -> (HeaderMap, String) {
        let mut echo = HeaderMap::new();
        echo.insert("x-backend-method", method.as_str().parse().unwrap());
        echo.insert("x-backend-query", uri.query().unwrap_or("").parse().unwrap());
        echo.insert("x-backend-body", body.parse().unwrap());
        if let Some(host) = headers.get("host") {
            echo.insert("x-backend-host", host.clone());
        }
        if let Some(id) = headers.get("x-request-id") {
            echo.insert("x-backend-request-id", id.clone());
        }
        if let Some(forwarded) = headers.get("x-forwarded-for") {
            echo.insert("x-backend-forwarded-for", forwarded.clone());
        }
        (echo, format!("API server says hi: {}\n", uri.path()))
    }

    let app = Router::new().fallback(greet);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
