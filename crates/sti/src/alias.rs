//! Discriminator aliases
//!
//! An STI root may map short aliases to the fully-qualified names of its
//! children. Children missing from the map use their snake_case basename.

use std::collections::HashMap;

use crate::error::{StiError, StiResult};
use crate::inflector;
use crate::model::Model;

/// Alias used for a type that its root does not map explicitly
pub fn default_alias(type_name: &str) -> String {
    inflector::snake_case(inflector::class_basename(type_name))
}

/// Alias table declared by an STI root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildTypes {
    entries: Vec<(String, String)>,
}

impl ChildTypes {
    pub fn new<I, A, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(alias, type_name)| (alias.into(), type_name.into()))
                .collect(),
        }
    }

    /// Alias table declared by root `R`
    pub fn of<R: Model>() -> Self {
        Self::new(R::child_types())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discriminator value stored for rows of `type_name`
    pub fn alias_of(&self, type_name: &str) -> String {
        self.entries
            .iter()
            .find(|(_, mapped)| mapped == type_name)
            .map(|(alias, _)| alias.clone())
            .unwrap_or_else(|| default_alias(type_name))
    }

    /// Type name an alias was declared for
    pub fn type_for_alias(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(declared, _)| declared == alias)
            .map(|(_, type_name)| type_name.as_str())
    }

    /// Reject tables where one alias is declared for two different types
    pub fn validate(&self) -> StiResult<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (alias, type_name) in &self.entries {
            match seen.get(alias.as_str()) {
                Some(first) if *first != type_name.as_str() => {
                    return Err(StiError::AliasCollision {
                        alias: alias.clone(),
                        first: first.to_string(),
                        second: type_name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(alias.as_str(), type_name.as_str());
                }
            }
        }
        Ok(())
    }

    /// Reject a type whose alias is already declared for another type
    pub fn validate_member(&self, type_name: &str) -> StiResult<()> {
        let alias = self.alias_of(type_name);
        match self.type_for_alias(&alias) {
            Some(owner) if owner != type_name => Err(StiError::AliasCollision {
                alias,
                first: owner.to_string(),
                second: type_name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
