use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::schema::{Schema, SchemaPage};

/// In-memory set of schemas loaded from a registry response.
///
/// Every schema is unique by `(name, version)` and has a positive version.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: Vec<Schema>,
}

impl SchemaCatalog {
    pub fn new(schemas: Vec<Schema>) -> Result<Self> {
        let mut seen = HashSet::new();
        for schema in &schemas {
            if schema.name.is_empty() {
                return Err(Error::InvalidSchema(
                    "schema name must not be empty".to_string(),
                ));
            }
            if schema.version == 0 {
                return Err(Error::InvalidSchema(format!(
                    "schema '{}' has version 0; versions start at 1",
                    schema.name
                )));
            }
            if !seen.insert((schema.name.as_str(), schema.version)) {
                return Err(Error::DuplicateSchema {
                    name: schema.name.clone(),
                    version: schema.version,
                });
            }
        }
        Ok(Self { schemas })
    }

    pub fn from_page(page: SchemaPage) -> Result<Self> {
        Self::new(page.result_set)
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Self::from_page(SchemaPage::from_json(input)?)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Distinct schema names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.schemas
            .iter()
            .map(|schema| schema.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Versions published under `name`, highest first.
    pub fn versions(&self, name: &str) -> Vec<u32> {
        let mut versions: Vec<u32> = self
            .schemas
            .iter()
            .filter(|schema| schema.name == name)
            .map(|schema| schema.version)
            .collect();
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions
    }

    pub fn default_name(&self) -> Option<&str> {
        self.schemas.first().map(|schema| schema.name.as_str())
    }

    pub fn latest_version(&self, name: &str) -> Option<u32> {
        self.versions(name).first().copied()
    }

    pub fn find(&self, name: &str, version: u32) -> Option<&Schema> {
        self.schemas
            .iter()
            .find(|schema| schema.name == name && schema.version == version)
    }

    /// Resolve a selection, defaulting to the first name and its latest version.
    pub fn select(&self, name: Option<&str>, version: Option<u32>) -> Option<&Schema> {
        let name = name.or_else(|| self.default_name())?;
        let version = version.or_else(|| self.latest_version(name))?;
        self.find(name, version)
    }
}
