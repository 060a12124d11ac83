use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Replacements;

/// Values offered for one variable when generating variations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValues {
    /// Used as-is in every variation.
    One(String),
    /// One element picked at random per variation.
    Many(Vec<String>),
}

impl From<&str> for VariableValues {
    fn from(value: &str) -> Self {
        VariableValues::One(value.to_string())
    }
}

impl From<String> for VariableValues {
    fn from(value: String) -> Self {
        VariableValues::One(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for VariableValues {
    fn from(values: Vec<S>) -> Self {
        VariableValues::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for VariableValues {
    fn from(values: [S; N]) -> Self {
        VariableValues::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Variable name to the values offered for it.
pub type VariableSets = BTreeMap<String, VariableValues>;

/// One generated output and the replacements that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub content: String,
    pub replacements: Replacements,
}
