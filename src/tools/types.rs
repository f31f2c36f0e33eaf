//! Tool parameter schemas.
//!
//! Each tool declares its contract as a JSON-Schema object built here and
//! consumed by the generic validator — constraints live in the declaration,
//! not in handler bodies.

use serde::{Deserialize, Serialize};

/// JSON Schema-based parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameters {
    /// JSON Schema object describing the parameters.
    pub schema: serde_json::Value,
}

impl ToolParameters {
    /// Create an empty parameter schema (no parameters).
    pub fn empty() -> Self {
        Self {
            schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        }
    }

    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            properties: serde_json::Map::new(),
            required: Vec::new(),
        }
    }
}

/// Builder for constructing tool parameter schemas.
pub struct ParameterBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    fn push(
        mut self,
        name: String,
        mut prop: serde_json::Map<String, serde_json::Value>,
        description: String,
        required: bool,
    ) -> Self {
        prop.insert("description".into(), description.into());
        self.properties.insert(name.clone(), prop.into());
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add a string property.
    pub fn string(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let mut prop = serde_json::Map::new();
        prop.insert("type".into(), "string".into());
        self.push(name.into(), prop, description.into(), required)
    }

    /// Add a string property with a maximum length bound.
    pub fn string_bounded(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        max_length: usize,
        required: bool,
    ) -> Self {
        let mut prop = serde_json::Map::new();
        prop.insert("type".into(), "string".into());
        prop.insert("maxLength".into(), max_length.into());
        self.push(name.into(), prop, description.into(), required)
    }

    /// Add a closed string enumeration, optionally with a default.
    pub fn string_enum(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        default: Option<&str>,
        required: bool,
    ) -> Self {
        let mut prop = serde_json::Map::new();
        prop.insert("type".into(), "string".into());
        prop.insert("enum".into(), serde_json::json!(values));
        if let Some(default) = default {
            prop.insert("default".into(), default.into());
        }
        self.push(name.into(), prop, description.into(), required)
    }

    /// Add an integer property with inclusive bounds, optionally defaulted.
    pub fn integer_bounded(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        minimum: i64,
        maximum: i64,
        default: Option<i64>,
        required: bool,
    ) -> Self {
        let mut prop = serde_json::Map::new();
        prop.insert("type".into(), "integer".into());
        prop.insert("minimum".into(), minimum.into());
        prop.insert("maximum".into(), maximum.into());
        if let Some(default) = default {
            prop.insert("default".into(), default.into());
        }
        self.push(name.into(), prop, description.into(), required)
    }

    /// Build into ToolParameters.
    pub fn build(self) -> ToolParameters {
        ToolParameters {
            schema: serde_json::json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}
