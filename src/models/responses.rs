//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing JSON response bodies. Lookups and
//! removals answer with plain text bodies and need no DTO.

use serde::Serialize;

/// Response body for the add operation (POST /cache/add)
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// The stored key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl AddResponse {
    /// Creates a new AddResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
