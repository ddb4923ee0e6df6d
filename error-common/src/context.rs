use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error context information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    pub operation: String,
    pub additional: BTreeMap<String, String>,
}

impl ErrorContext {
    pub fn new<S: Into<String>>(operation: S) -> Self {
        Self {
            operation: operation.into(),
            additional: BTreeMap::new(),
        }
    }

    pub fn add_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// Renders the extra fields as `key=value` pairs in key order.
    pub fn describe(&self) -> String {
        self.additional
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
