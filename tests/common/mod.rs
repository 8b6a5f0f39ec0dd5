//! In-process mock of the onetimesecret.com API for integration tests.
//!
//! Mirrors the upstream contract: form-encoded input, JSON output,
//! "Unknown secret" for anything that cannot be served, destruction of
//! the value on first successful read, and `received` set at that
//! moment. Secret keys are excluded from the recent-metadata listing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Form, Json, Router};
use base64::prelude::*;
use serde_json::{json, Value};
use tokio::sync::RwLock;

#[derive(Clone)]
struct StoredSecret {
    metadata_key: String,
    secret_key: String,
    custid: String,
    /// Cleared once the secret has been read.
    value: Option<String>,
    passphrase: Option<String>,
    recipient: Vec<String>,
    ttl: i64,
    created: i64,
    received: i64,
}

#[derive(Clone, Default)]
struct AppState {
    db: Arc<RwLock<HashMap<String, StoredSecret>>>,
    counter: Arc<AtomicU64>,
}

impl AppState {
    async fn insert(
        &self,
        custid: String,
        value: Option<String>,
        params: &HashMap<String, String>,
    ) -> StoredSecret {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let recipient = if custid == "anon" {
            // Emailing a link requires an authenticated account.
            Vec::new()
        } else {
            params.get("recipient").cloned().into_iter().collect()
        };
        let secret = StoredSecret {
            metadata_key: format!("meta{n:08}"),
            secret_key: format!("key{n:08}"),
            custid,
            value: Some(value.unwrap_or_else(|| format!("generated{n:08}"))),
            passphrase: params.get("passphrase").cloned(),
            recipient,
            ttl: params
                .get("ttl")
                .and_then(|t| t.parse().ok())
                .unwrap_or(604_800),
            created: chrono::Utc::now().timestamp(),
            received: 0,
        };
        self.db
            .write()
            .await
            .insert(secret.metadata_key.clone(), secret.clone());
        secret
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/api/v1/share", post(share))
        .route("/api/v1/generate", post(generate))
        .route("/api/v1/secret/{key}", post(retrieve_secret))
        .route("/api/v1/private/recent", post(recent))
        .route("/api/v1/private/{key}", post(retrieve_metadata))
        .with_state(AppState::default())
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Start the mock server on a random port and return its address.
pub fn spawn() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock listener");
    let addr = std_listener.local_addr().expect("mock listener addr");
    std_listener
        .set_nonblocking(true)
        .expect("nonblocking mock listener");

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock runtime");
        rt.block_on(async {
            let listener =
                tokio::net::TcpListener::from_std(std_listener).expect("tokio listener");
            run(listener).await
        })
        .expect("mock server");
    });

    addr
}

async fn share(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let Some(value) = params.get("secret").filter(|v| !v.is_empty()) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "You did not provide anything to share" })),
        );
    };
    let secret = state
        .insert(custid(&headers), Some(value.clone()), &params)
        .await;
    (StatusCode::OK, Json(metadata_json(&secret, true)))
}

async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let secret = state.insert(custid(&headers), None, &params).await;
    let mut payload = metadata_json(&secret, true);
    payload["value"] = json!(secret.value);
    (StatusCode::OK, Json(payload))
}

async fn retrieve_secret(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut db = state.db.write().await;
    let Some(secret) = db.values_mut().find(|s| s.secret_key == key) else {
        return unknown_secret();
    };

    let supplied = params.get("passphrase").map(String::as_str).unwrap_or("");
    let required = secret.passphrase.as_deref().unwrap_or("");
    if secret.value.is_none() || supplied != required {
        return unknown_secret();
    }

    let value = secret.value.take();
    secret.received = chrono::Utc::now().timestamp();
    (
        StatusCode::OK,
        Json(json!({ "secret_key": secret.secret_key, "value": value })),
    )
}

async fn retrieve_metadata(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> (StatusCode, Json<Value>) {
    let db = state.db.read().await;
    match db.get(&key) {
        Some(secret) => (
            StatusCode::OK,
            Json(metadata_json(secret, secret.value.is_some())),
        ),
        None => unknown_secret(),
    }
}

async fn recent(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let custid = custid(&headers);
    if custid == "anon" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Not authorized" })),
        );
    }
    let db = state.db.read().await;
    let mut entries: Vec<&StoredSecret> = db.values().filter(|s| s.custid == custid).collect();
    entries.sort_by_key(|s| std::cmp::Reverse(s.metadata_key.clone()));
    let listing: Vec<Value> = entries.iter().map(|s| metadata_json(s, false)).collect();
    (StatusCode::OK, Json(json!(listing)))
}

fn unknown_secret() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Unknown secret" })),
    )
}

/// Username from the Basic auth header, or "anon" without one.
fn custid(headers: &HeaderMap) -> String {
    let encoded = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .unwrap_or_default();
    let decoded = BASE64_STANDARD.decode(encoded).unwrap_or_default();
    let decoded = String::from_utf8(decoded).unwrap_or_default();
    match decoded.split(':').next() {
        Some(user) if !user.is_empty() => user.to_string(),
        _ => "anon".to_string(),
    }
}

/// Metadata payload as the service shapes it. The secret key is only
/// present while the value has not been consumed (and never in the
/// recent listing).
fn metadata_json(s: &StoredSecret, include_secret_key: bool) -> Value {
    json!({
        "custid": s.custid,
        "metadata_key": s.metadata_key,
        "secret_key": if include_secret_key { s.secret_key.as_str() } else { "" },
        "recipient": s.recipient,
        "passphrase_required": s.passphrase.is_some(),
        "ttl": s.ttl,
        "metadata_ttl": s.ttl,
        "secret_ttl": s.ttl,
        "created": s.created,
        "updated": s.created,
        "received": s.received,
    })
}
