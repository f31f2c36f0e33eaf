//! Typed access to tool call arguments.

use crate::error::{BridgeError, Result};

/// Wrapper around validated tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get a required string argument.
    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| BridgeError::validation(key, "missing required parameter"))
    }

    /// Get an optional string argument. Empty strings count as absent, so
    /// callers that pass `""` for "no filter" get the unfiltered behavior.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Get a required integer argument.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        self.value
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| BridgeError::validation(key, "missing required parameter"))
    }

    /// Parse a required argument into a closed enumeration.
    ///
    /// Enum membership has already been schema-checked by the validator;
    /// this converts the wire string into the typed variant.
    pub fn get_enum<T: std::str::FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.get_str(key)?;
        raw.parse::<T>()
            .map_err(|_| BridgeError::validation(key, format!("'{raw}' is not a valid value")))
    }

    /// Parse an optional argument into a closed enumeration.
    pub fn get_enum_opt<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get_str_opt(key) {
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| BridgeError::validation(key, format!("'{raw}' is not a valid value"))),
            None => Ok(None),
        }
    }
}
