// tests/common/mod.rs
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::task::JoinHandle;

use crate::config::settings::{RetryPolicy, SpApiConfig};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn call_counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

/// Token endpoint always issuing `token` with the given lifetime, counting
/// exchange calls.
pub fn auth_router(token: &'static str, expires_in: i64, counter: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/auth/o2/token",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "access_token": token, "expires_in": expires_in }))
            }
        }),
    )
}

/// Config pointing both the token endpoint and the target API at local
/// mock servers.
pub fn test_config(auth_addr: SocketAddr, api_addr: SocketAddr) -> SpApiConfig {
    let mut config = SpApiConfig::new(
        "refresh-token".into(),
        "client-id".into(),
        "client-secret".into(),
        "eu-west-1".into(),
        "A1PA6795UKMFR9".into(),
    );
    config.auth_url = format!("http://{}/auth/o2/token", auth_addr);
    config.endpoint_override = Some(format!("http://{}", api_addr));
    config
}

/// Millisecond-scale backoff unit so timing assertions stay fast; the
/// `2^attempt` formula is unchanged.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff_unit: Duration::from_millis(50),
    }
}
