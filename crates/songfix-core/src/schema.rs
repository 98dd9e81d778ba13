use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;
use crate::types::FieldDefinition;

/// A named, versioned field schema as published by the registry.
///
/// On the wire the fields live under `schema.properties`; `fields` keeps them
/// in document order because column order in generated tables depends on it.
/// `created_at` keeps the registry's text as published; see [`Schema::created_at_utc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SchemaRecord", into = "SchemaRecord")]
pub struct Schema {
    pub name: String,
    pub version: u32,
    pub created_at: Option<String>,
    pub options: SchemaOptions,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
            created_at: None,
            options: SchemaOptions::default(),
            fields: Vec::new(),
        }
    }

    /// Append a field, keeping declaration order.
    pub fn with_field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.push(Field {
            name: name.into(),
            definition,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Creation time as UTC. Timestamps without an offset are read as UTC;
    /// unparseable text yields `None`.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        raw.parse::<NaiveDateTime>()
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub definition: FieldDefinition,
}

/// Registry options attached to a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaOptions {
    #[serde(default)]
    pub file_types: BTreeSet<String>,
    #[serde(default)]
    pub external_validations: BTreeSet<String>,
}

/// Paginated registry response listing schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaPage {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub result_set: Vec<Schema>,
}

impl SchemaPage {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaRecord {
    name: String,
    version: u32,
    #[serde(
        default,
        deserialize_with = "deserialize_created_at",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<String>,
    #[serde(default)]
    options: SchemaOptions,
    #[serde(default)]
    schema: Option<SchemaBody>,
}

#[derive(Default, Serialize, Deserialize)]
struct SchemaBody {
    #[serde(
        default,
        deserialize_with = "deserialize_fields",
        serialize_with = "serialize_fields"
    )]
    properties: Vec<Field>,
}

impl From<SchemaRecord> for Schema {
    fn from(record: SchemaRecord) -> Self {
        Self {
            name: record.name,
            version: record.version,
            created_at: record.created_at,
            options: record.options,
            fields: record.schema.map(|body| body.properties).unwrap_or_default(),
        }
    }
}

impl From<Schema> for SchemaRecord {
    fn from(schema: Schema) -> Self {
        Self {
            name: schema.name,
            version: schema.version,
            created_at: schema.created_at,
            options: schema.options,
            schema: Some(SchemaBody {
                properties: schema.fields,
            }),
        }
    }
}

// Non-string timestamps are dropped rather than failing the whole page.
fn deserialize_created_at<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

fn deserialize_fields<'de, D>(deserializer: D) -> std::result::Result<Vec<Field>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FieldsVisitor)
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = Vec<Field>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object of field definitions")
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Vec::new())
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields: Vec<Field> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, definition)) = access.next_entry::<String, FieldDefinition>()? {
            // Repeated keys keep their first position and the last definition.
            match fields.iter_mut().find(|field| field.name == name) {
                Some(existing) => existing.definition = definition,
                None => fields.push(Field { name, definition }),
            }
        }
        Ok(fields)
    }
}

fn serialize_fields<S>(fields: &[Field], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(fields.iter().map(|field| (&field.name, &field.definition)))
}
