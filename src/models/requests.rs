//! Request DTOs for the cache server API
//!
//! Bodies are parsed leniently: anything that is not a JSON object with the
//! expected string fields is rejected with the endpoint's validation message.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Error message for an add request without string `key` and `value`
pub const ADD_REQUIRED: &str = "key and value (both strings) are required";

/// Error message for a get/remove request without a string `key`
pub const KEY_REQUIRED: &str = "key (string) is required";

/// Parses `body` as a JSON object into `T`.
///
/// Returns None for anything else, including arrays, which serde would
/// otherwise accept positionally for a struct.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Option<T> {
    match serde_json::from_slice::<Value>(body).ok()? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Request body for the add operation (POST /cache/add)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddRequest {
    /// The cache key, must be a JSON string
    #[serde(default)]
    pub key: Value,
    /// The value to store, must be a JSON string
    #[serde(default)]
    pub value: Value,
}

impl AddRequest {
    /// Parses a raw body; malformed input yields an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        parse_object(body).unwrap_or_default()
    }

    /// Returns the key and value if both are strings.
    pub fn validate(self) -> Result<(String, String)> {
        match (self.key, self.value) {
            (Value::String(key), Value::String(value)) => Ok((key, value)),
            _ => Err(CacheError::InvalidRequest(ADD_REQUIRED.to_string())),
        }
    }
}

/// Request body for the get and remove operations
/// (GET /cache/get, POST /cache/remove)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyRequest {
    /// The cache key, must be a JSON string
    #[serde(default)]
    pub key: Value,
}

impl KeyRequest {
    /// Parses a raw body; malformed input yields an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        parse_object(body).unwrap_or_default()
    }

    /// Returns the key if it is a string.
    pub fn validate(self) -> Result<String> {
        match self.key {
            Value::String(key) => Ok(key),
            _ => Err(CacheError::InvalidRequest(KEY_REQUIRED.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_valid() {
        let req = AddRequest::from_body(br#"{"key": "test", "value": "hello"}"#);
        assert_eq!(
            req.validate(),
            Ok(("test".to_string(), "hello".to_string()))
        );
    }

    #[test]
    fn test_add_request_empty_strings_are_valid() {
        let req = AddRequest::from_body(br#"{"key": "", "value": ""}"#);
        assert_eq!(req.validate(), Ok((String::new(), String::new())));
    }

    #[test]
    fn test_add_request_ignores_extra_fields() {
        let req = AddRequest::from_body(br#"{"key": "k", "value": "v", "ttl": 5}"#);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_add_request_rejections() {
        let bodies: [&[u8]; 8] = [
            br#"{"value": "testValue"}"#,
            br#"{"key": "testKey"}"#,
            br#"{"key": 123, "value": "testValue"}"#,
            br#"{"key": "testKey", "value": 123}"#,
            br#"{"key": null, "value": "v"}"#,
            br#"{}"#,
            br#"["key", "value"]"#,
            b"",
        ];

        for body in bodies {
            let err = AddRequest::from_body(body).validate().unwrap_err();
            assert_eq!(err, CacheError::InvalidRequest(ADD_REQUIRED.to_string()));
        }
    }

    #[test]
    fn test_key_request_valid() {
        let req = KeyRequest::from_body(br#"{"key": "test"}"#);
        assert_eq!(req.validate(), Ok("test".to_string()));
    }

    #[test]
    fn test_key_request_rejections() {
        let bodies: [&[u8]; 5] = [
            br#"{}"#,
            br#"{"key": 123}"#,
            br#"{"key": true}"#,
            b"{not json",
            b"",
        ];

        for body in bodies {
            let err = KeyRequest::from_body(body).validate().unwrap_err();
            assert_eq!(err, CacheError::InvalidRequest(KEY_REQUIRED.to_string()));
        }
    }
}
