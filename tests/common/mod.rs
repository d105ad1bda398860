//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use traefik_mapper::{HttpServer, ServiceConfig, Shutdown};
use url::Url;

/// The six-router control plane document.
pub fn fixture() -> Value {
    serde_json::from_str(include_str!("../fixtures/coolify.json")).unwrap()
}

/// Start a mock control plane serving `body` at `/traefik` with `status`.
pub async fn start_mock_upstream(status: StatusCode, body: String) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/traefik",
        get(move || {
            let body = body.clone();
            async move { (status, [("content-type", "application/json")], body) }
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Url::parse(&format!("http://{addr}/traefik")).unwrap()
}

/// Start a control plane that answers `/traefik` only after `delay`.
pub async fn start_slow_upstream(delay: Duration) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/traefik",
        get(move || async move {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, [("content-type", "application/json")], "{}")
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Url::parse(&format!("http://{addr}/traefik")).unwrap()
}

/// Start the mapper service; returns its address and the shutdown handle.
pub async fn start_mapper(mut config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
