//! Core value types: replacement maps, the named value pool, variations.

use std::collections::BTreeMap;

mod error;
mod pool;
mod variation;

pub use error::PoolError;
pub use pool::{NamedValuePool, PoolEntry, ServiceForms, VariableRow, VariableType};
pub use variation::{VariableSets, VariableValues, Variation};

/// Variable name to concrete value, supplied per call.
pub type Replacements = BTreeMap<String, String>;
