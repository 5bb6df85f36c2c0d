use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A logical collection exposed over HTTP and the physical table behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub table: String,
    /// Columns matched by free-text search, in filter order
    #[serde(default)]
    pub search_columns: Vec<String>,
}

impl Collection {
    pub fn new(name: &str, table: &str, search_columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            search_columns: search_columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Ordered set of collections. The order is kept for error messages and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionTable {
    collections: Vec<Collection>,
}

#[derive(Debug, Error)]
pub enum CollectionFileError {
    #[error("Failed to read collections file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid collections file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid collections file {path}: {message}")]
    Invalid { path: String, message: String },
}

pub static DEFAULT_COLLECTIONS: Lazy<CollectionTable> = Lazy::new(CollectionTable::defaults);

impl CollectionTable {
    pub fn new(collections: Vec<Collection>) -> Self {
        let collections = collections
            .into_iter()
            .map(|mut c| {
                c.name = c.name.trim().to_lowercase();
                c
            })
            .collect();
        Self { collections }
    }

    /// The five portfolio collections, each backed by a table of the same name
    pub fn defaults() -> Self {
        Self::new(vec![
            Collection::new("properties", "properties", &["name", "address", "city", "state", "zip"]),
            Collection::new("units", "units", &["unit_number", "property_id"]),
            Collection::new("leases", "leases", &["id", "unit_id", "status"]),
            Collection::new("tenants", "tenants", &["name", "email", "phone"]),
            Collection::new("owners", "owners", &["name", "email", "phone"]),
        ])
    }

    /// Load a table from YAML of the form `collections: [{ name, table, search_columns }]`
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CollectionFileError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| CollectionFileError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            CollectionFileError::Yaml { source, .. } => CollectionFileError::Yaml { path: display, source },
            CollectionFileError::Invalid { message, .. } => CollectionFileError::Invalid { path: display, message },
            other => other,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CollectionFileError> {
        let raw: CollectionTable = serde_yaml::from_str(content).map_err(|source| CollectionFileError::Yaml {
            path: "<inline>".to_string(),
            source,
        })?;
        let table = Self::new(raw.collections);
        table.validate().map_err(|message| CollectionFileError::Invalid {
            path: "<inline>".to_string(),
            message,
        })?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), String> {
        if self.collections.is_empty() {
            return Err("at least one collection is required".to_string());
        }
        for (i, c) in self.collections.iter().enumerate() {
            if c.name.is_empty() {
                return Err(format!("collection #{} has an empty name", i + 1));
            }
            if c.table.trim().is_empty() {
                return Err(format!("collection '{}' has an empty table", c.name));
            }
            if self.collections[..i].iter().any(|prev| prev.name == c.name) {
                return Err(format!("collection '{}' is defined twice", c.name));
            }
        }
        Ok(())
    }

    /// Exact lookup on an already-normalized name
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl Default for CollectionTable {
    fn default() -> Self {
        DEFAULT_COLLECTIONS.clone()
    }
}
