//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `POST /cache/add` - Store a key-value pair
//! - `GET /cache/get` - Retrieve a value by key
//! - `POST /cache/remove` - Remove a key
//! - `GET /ping` - Liveness check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
