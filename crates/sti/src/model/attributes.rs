//! Attribute storage for model instances

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Column/value pairs held by a model instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: BTreeMap<String, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn set<T: Into<Value>>(&mut self, column: &str, value: T) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Mass-assign values whose column appears in `allowed`.
    ///
    /// Returns the columns that were rejected.
    pub fn fill<I>(&mut self, values: I, allowed: &[String]) -> Vec<String>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut rejected = Vec::new();
        for (column, value) in values {
            if allowed.iter().any(|a| a == &column) {
                self.values.insert(column, value);
            } else {
                rejected.push(column);
            }
        }
        rejected
    }

    /// Assign values regardless of the mass-assignment whitelist
    pub fn force_fill<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.values.extend(values);
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
