//! Validate tool call arguments against their declared schema before any
//! backend call is attempted.

use crate::error::BridgeError;

/// Normalize arguments ahead of validation: drop empty-string optionals,
/// then fill declared defaults for absent ones.
///
/// An empty string for an optional parameter means "not provided" — callers
/// that pass `""` for a filter get the unfiltered behavior instead of an
/// enum-membership rejection. Runs before [`validate_arguments`] so that
/// defaulted values are subject to the same bound checks as caller-supplied
/// ones.
pub fn apply_defaults(args: &mut serde_json::Value, schema: &serde_json::Value) {
    let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) else {
        return;
    };
    let required: Vec<&str> = schema
        .get("required")
        .and_then(|v| v.as_array())
        .map(|fields| fields.iter().filter_map(|f| f.as_str()).collect())
        .unwrap_or_default();
    let Some(obj) = args.as_object_mut() else {
        return;
    };
    obj.retain(|key, value| required.contains(&key.as_str()) || value.as_str() != Some(""));
    for (key, prop_schema) in properties {
        if obj.contains_key(key) {
            continue;
        }
        if let Some(default) = prop_schema.get("default") {
            obj.insert(key.clone(), default.clone());
        }
    }
}

/// Validate tool arguments against a JSON Schema.
///
/// Checks, in order: argument shape, required-field presence, property
/// type, enum membership, inclusive integer bounds, and string length
/// bounds. The first violation wins and its message names the field.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), BridgeError> {
    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        if schema_type == "object" && !args.is_object() {
            return Err(BridgeError::validation(
                "arguments",
                format!("expected an object, got {}", json_type_name(args)),
            ));
        }
    }

    let obj = match args.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for field in required {
            if let Some(name) = field.as_str() {
                if !obj.contains_key(name) || obj[name].is_null() {
                    return Err(BridgeError::validation(name, "missing required parameter"));
                }
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in obj {
            let Some(prop_schema) = properties.get(key) else {
                continue;
            };
            if value.is_null() {
                continue; // optional and absent
            }
            validate_property(key, value, prop_schema)?;
        }
    }

    Ok(())
}

fn validate_property(
    key: &str,
    value: &serde_json::Value,
    prop_schema: &serde_json::Value,
) -> Result<(), BridgeError> {
    if let Some(expected_type) = prop_schema.get("type").and_then(|v| v.as_str()) {
        if !value_matches_type(value, expected_type) {
            return Err(BridgeError::validation(
                key,
                format!(
                    "expected type '{}', got {}",
                    expected_type,
                    json_type_name(value)
                ),
            ));
        }
    }

    if let Some(allowed) = prop_schema.get("enum").and_then(|v| v.as_array()) {
        if !allowed.contains(value) {
            let options: Vec<&str> = allowed.iter().filter_map(|v| v.as_str()).collect();
            return Err(BridgeError::validation(
                key,
                format!(
                    "'{}' is not one of [{}]",
                    value.as_str().unwrap_or_default(),
                    options.join(", ")
                ),
            ));
        }
    }

    if let Some(n) = value.as_i64() {
        if let Some(minimum) = prop_schema.get("minimum").and_then(|v| v.as_i64()) {
            if n < minimum {
                return Err(BridgeError::validation(
                    key,
                    format!("must be at least {minimum}, got {n}"),
                ));
            }
        }
        if let Some(maximum) = prop_schema.get("maximum").and_then(|v| v.as_i64()) {
            if n > maximum {
                return Err(BridgeError::validation(
                    key,
                    format!("must be at most {maximum}, got {n}"),
                ));
            }
        }
    }

    if let Some(s) = value.as_str() {
        if let Some(max_length) = prop_schema.get("maxLength").and_then(|v| v.as_u64()) {
            if s.chars().count() as u64 > max_length {
                return Err(BridgeError::validation(
                    key,
                    format!("must be at most {max_length} characters"),
                ));
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
