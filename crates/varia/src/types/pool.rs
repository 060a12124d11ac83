use std::collections::BTreeMap;
use std::collections::btree_map::Iter;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PoolError;

/// Singular and plural forms of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceForms {
    pub singular: String,
    pub plural: String,
}

impl ServiceForms {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

/// The values stored under one pool name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoolEntry {
    /// Candidate values; one is picked at random per substitution.
    List(Vec<String>),
    /// Service key to forms. An entry named `N` fills `{N}` and `{N_plural}`
    /// using the replacement `N_key` to select the service.
    Services(BTreeMap<String, ServiceForms>),
}

/// The `variable_type` column of a stored variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Location,
    Service,
    Custom,
}

/// One stored variable, as read from a variables table.
///
/// `values` is JSON text: a list of strings, or for services an object of
/// service key to `{"singular": ..., "plural": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRow {
    pub variable_name: String,
    pub variable_type: VariableType,
    pub values: String,
}

/// Caller-supplied catalog of reusable variable values.
///
/// The pool is read-only during substitution and passed explicitly to every
/// call, so one engine can serve concurrent requests with different pools.
///
/// # Example
///
/// ```
/// use varia::{NamedValuePool, ServiceForms};
///
/// let pool = NamedValuePool::new()
///     .with_list("location", ["Brisbane", "Sydney"])
///     .with_services("service", [("paint", ServiceForms::new("painter", "painters"))]);
///
/// assert!(pool.is_known("location"));
/// assert!(pool.is_known("service_plural"));
/// assert!(!pool.is_known("city"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedValuePool {
    entries: BTreeMap<String, PoolEntry>,
}

impl NamedValuePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous entry with that name.
    pub fn insert(&mut self, name: impl Into<String>, entry: PoolEntry) -> Option<PoolEntry> {
        self.entries.insert(name.into(), entry)
    }

    /// Add a list entry.
    pub fn with_list<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.insert(name, PoolEntry::List(values));
        self
    }

    /// Add a services entry.
    pub fn with_services<K: Into<String>>(
        mut self,
        name: impl Into<String>,
        services: impl IntoIterator<Item = (K, ServiceForms)>,
    ) -> Self {
        let services = services
            .into_iter()
            .map(|(key, forms)| (key.into(), forms))
            .collect();
        self.insert(name, PoolEntry::Services(services));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PoolEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> Iter<'_, String, PoolEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `{name}` is a placeholder this pool can fill.
    ///
    /// Besides entry names this includes `N_plural` for every services
    /// entry `N`.
    pub fn is_known(&self, name: &str) -> bool {
        if self.contains(name) {
            return true;
        }
        name.strip_suffix("_plural")
            .and_then(|base| self.get(base))
            .is_some_and(|entry| matches!(entry, PoolEntry::Services(_)))
    }

    /// Build a pool from stored variable rows.
    ///
    /// Rows of type `service` decode as service maps, all others as lists.
    /// A later row with the same name replaces an earlier one.
    pub fn from_rows(rows: &[VariableRow]) -> Result<Self, PoolError> {
        let mut pool = NamedValuePool::new();
        for row in rows {
            let entry = decode_row(row).map_err(|source| PoolError::InvalidValues {
                name: row.variable_name.clone(),
                source,
            })?;
            pool.insert(row.variable_name.clone(), entry);
        }
        debug!(entries = pool.len(), "loaded pool from rows");
        Ok(pool)
    }

    /// Parse a JSON object of name to list or service map.
    pub fn from_json_str(json: &str) -> Result<Self, PoolError> {
        serde_json::from_str(json).map_err(|source| PoolError::InvalidDocument { source })
    }

    /// Load a pool from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PoolError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pool = Self::from_json_str(&content)?;
        debug!(path = %path.display(), entries = pool.len(), "loaded pool file");
        Ok(pool)
    }
}

fn decode_row(row: &VariableRow) -> Result<PoolEntry, serde_json::Error> {
    match row.variable_type {
        VariableType::Service => serde_json::from_str(&row.values).map(PoolEntry::Services),
        VariableType::Location | VariableType::Custom => {
            serde_json::from_str(&row.values).map(PoolEntry::List)
        }
    }
}

impl<'a> IntoIterator for &'a NamedValuePool {
    type Item = (&'a String, &'a PoolEntry);
    type IntoIter = Iter<'a, String, PoolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
