//! Resource DTOs.
//!
//! # Design
//! `Product` mirrors the mock-server's schema but is defined independently.
//! Only `id` is meaningful to the rest of the system; everything else is
//! carried through as an opaque payload, so unknown fields are captured in
//! `extra` and written back out unchanged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record that can be addressed by a string key.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn key(&self) -> &str;
}

/// A single product as exchanged with the downstream API.
///
/// Only `id` is typed. Every other field, `name` included, lives in `extra`
/// as raw JSON, so whatever the caller or the downstream sends comes back out
/// byte-for-byte equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("name".to_string(), Value::String(name.into()));
        Self {
            id: id.into(),
            extra,
        }
    }

    /// The `name` field, when present and a string.
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

impl Resource for Product {
    fn key(&self) -> &str {
        &self.id
    }
}
