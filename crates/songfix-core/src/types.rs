use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared JSON type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    /// Any other type name. `None` when `type` is absent or not a single name
    /// (e.g. `["string", "null"]`).
    Other(Option<String>),
}

impl FieldType {
    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("string") => FieldType::String,
            Some("integer") => FieldType::Integer,
            Some("number") => FieldType::Number,
            Some("boolean") => FieldType::Boolean,
            Some(other) => FieldType::Other(Some(other.to_string())),
            None => FieldType::Other(None),
        }
    }

    /// Type name as it appears in the registry document.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldType::String => Some("string"),
            FieldType::Integer => Some("integer"),
            FieldType::Number => Some("number"),
            FieldType::Boolean => Some("boolean"),
            FieldType::Other(name) => name.as_deref(),
        }
    }
}

/// Type, format and enum constraints for one schema field.
///
/// Decoding is total: any JSON value becomes a definition. Non-object
/// definitions, unknown types and non-string formats collapse into
/// `FieldType::Other` / `None` so an evolving schema never blocks generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct FieldDefinition {
    pub field_type: FieldType,
    pub format: Option<String>,
    /// Allowed literals in declaration order; empty when absent.
    pub enum_values: Vec<Value>,
}

impl FieldDefinition {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            format: None,
            enum_values: Vec::new(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_enumerated(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// First enum literal rendered as text, if the field is enumerated.
    ///
    /// Strings render verbatim, `null` renders empty and every other literal
    /// renders as its JSON text.
    pub fn first_enum_literal(&self) -> Option<String> {
        self.enum_values.first().map(|value| match value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

impl From<Value> for FieldDefinition {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return FieldDefinition::new(FieldType::Other(None));
        };

        let format = map
            .get("format")
            .and_then(Value::as_str)
            .map(str::to_string);
        let enum_values = map
            .get("enum")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Self {
            field_type: FieldType::from_value(map.get("type")),
            format,
            enum_values,
        }
    }
}

impl From<FieldDefinition> for Value {
    fn from(definition: FieldDefinition) -> Self {
        let mut map = Map::new();
        if let Some(name) = definition.field_type.as_str() {
            map.insert("type".to_string(), Value::String(name.to_string()));
        }
        if let Some(format) = definition.format {
            map.insert("format".to_string(), Value::String(format));
        }
        if !definition.enum_values.is_empty() {
            map.insert("enum".to_string(), Value::Array(definition.enum_values));
        }
        Value::Object(map)
    }
}
