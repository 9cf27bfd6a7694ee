//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Each handler
//! validates its body, then makes exactly one engine call under the lock.

use std::sync::Arc;
use tokio::sync::Mutex;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use tracing::debug;

use crate::cache::CacheEngine;
use crate::config::Config;
use crate::error::Result;
use crate::models::{AddRequest, AddResponse, KeyRequest};

/// Application state shared across all handlers.
///
/// The engine sits behind a single mutex: every engine call mutates the
/// recency order, so all operations are serialized.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine
    pub cache: Arc<Mutex<CacheEngine>>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(cache: CacheEngine) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheEngine::from_config(config))
    }
}

/// Handler for POST /cache/add
///
/// Stores a key-value pair and echoes it back with 201 Created.
pub async fn add_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AddResponse>)> {
    let (key, value) = AddRequest::from_body(&body).validate()?;
    debug!(key = %key, "add");

    let response = AddResponse::new(key.clone(), value.clone());
    state.cache.lock().await.insert_or_update(key, value);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET /cache/get
///
/// Returns the raw value as the body, or an empty body if the key is absent.
pub async fn get_handler(State(state): State<AppState>, body: Bytes) -> Result<String> {
    let key = KeyRequest::from_body(&body).validate()?;

    let value = state.cache.lock().await.lookup(&key);
    debug!(key = %key, hit = value.is_some(), "get");

    Ok(value.unwrap_or_default())
}

/// Handler for POST /cache/remove
///
/// Removes the key if present; the response never says whether it was.
pub async fn remove_handler(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let key = KeyRequest::from_body(&body).validate()?;
    debug!(key = %key, "remove");

    state.cache.lock().await.remove(&key);

    Ok(StatusCode::OK)
}

/// Handler for GET /ping
pub async fn ping_handler() -> &'static str {
    "OK"
}
