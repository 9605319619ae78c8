//! Server harnesses
//!
//! [`TestApp`] drives the router in-process with `tower::ServiceExt::oneshot`.
//! [`LiveServer`] binds an ephemeral port for tests that need real sockets.

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use marketchat::backend::server::{build_app, ServerConfig};
use marketchat::client::ClientConfig;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use super::auth_helpers::{bearer, TEST_SECRET};
use super::database::create_test_pool;

fn test_config() -> ServerConfig {
    ServerConfig::new("sqlite::memory:", TEST_SECRET)
}

/// In-process application over a fresh database
pub struct TestApp {
    pub pool: SqlitePool,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = create_test_pool().await;
        let router = build_app(pool.clone(), &test_config());
        Self { pool, router }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, bearer(token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }
}

/// Application served on 127.0.0.1 with an ephemeral port
pub struct LiveServer {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
}

impl LiveServer {
    pub async fn spawn() -> Self {
        let pool = create_test_pool().await;
        let app = build_app(pool.clone(), &test_config());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, pool }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this server
    pub fn client_config(&self, token: &str) -> ClientConfig {
        ClientConfig::new(self.base_url()).with_token(token)
    }
}
