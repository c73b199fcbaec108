//! Schema conversion
//!
//! Maps a tool's JSON-schema parameter description into semantic
//! parameter metadata the function layer can coerce against.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{BridgeError, BridgeResult};

/// Semantic type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    String,
    Integer,
    Number,
    Boolean,
    /// An ordered sequence; element types are not validated further
    StringList,
    /// A key/value structure passed through as-is
    Map,
    /// Unknown or untyped; values pass through unchanged
    Any,
}

impl SemanticType {
    /// Map a JSON-schema `type` keyword to a semantic type.
    ///
    /// Unknown keywords degrade to [`SemanticType::Any`] rather than
    /// failing the conversion.
    pub fn from_schema_type(schema_type: &str) -> Self {
        match schema_type {
            "string" => SemanticType::String,
            "integer" => SemanticType::Integer,
            "number" => SemanticType::Number,
            "boolean" => SemanticType::Boolean,
            "array" => SemanticType::StringList,
            "object" => SemanticType::Map,
            _ => SemanticType::Any,
        }
    }

    /// Primitive value types admit an absent value when optional.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            SemanticType::Integer | SemanticType::Number | SemanticType::Boolean
        )
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticType::String => "string",
            SemanticType::Integer => "integer",
            SemanticType::Number => "number",
            SemanticType::Boolean => "boolean",
            SemanticType::StringList => "array of strings",
            SemanticType::Map => "object",
            SemanticType::Any => "any",
        };
        f.write_str(name)
    }
}

/// Metadata for one declared tool parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Property name as declared in the schema
    pub name: String,

    /// Property description, when the schema carries one
    pub description: Option<String>,

    /// Semantic type derived from the schema `type` keyword
    pub semantic_type: SemanticType,

    /// Whether the property appears in the schema's required set
    pub required: bool,

    /// Optional primitives accept an absent value
    pub nullable: bool,
}

/// Convert a tool's input schema into parameter metadata.
///
/// Returns `Ok(None)` when the schema declares no properties (the tool
/// takes no structured arguments), which is distinct from a conversion
/// failure. Entries preserve the schema's own property order.
pub fn convert_input_schema(
    tool: &str,
    schema: &Map<String, Value>,
) -> BridgeResult<Option<Vec<ParameterMetadata>>> {
    let properties = match schema.get("properties") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(BridgeError::SchemaConversion {
                tool: tool.to_string(),
                reason: format!("'properties' is not an object (got {})", json_kind(other)),
            })
        }
    };

    let required: HashSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut parameters = Vec::with_capacity(properties.len());

    for (name, declaration) in properties {
        let declaration = declaration
            .as_object()
            .ok_or_else(|| BridgeError::SchemaConversion {
                tool: tool.to_string(),
                reason: format!(
                    "property '{}' is not an object (got {})",
                    name,
                    json_kind(declaration)
                ),
            })?;

        let semantic_type = declaration
            .get("type")
            .and_then(Value::as_str)
            .map(SemanticType::from_schema_type)
            .unwrap_or(SemanticType::Any);

        let is_required = required.contains(name.as_str());

        parameters.push(ParameterMetadata {
            name: name.clone(),
            description: declaration
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            semantic_type,
            required: is_required,
            nullable: !is_required && semantic_type.is_primitive(),
        });
    }

    Ok(Some(parameters))
}

/// Name of a JSON value's kind, for diagnostics
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
