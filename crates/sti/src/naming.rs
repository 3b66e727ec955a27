//! Parent-derived names for child models
//!
//! Every function here is pure: the same parent always yields the same name.

use crate::identity::ParentType;
use crate::inflector;

/// Table shared with the parent: the explicit override, or the plural
/// snake_case parent basename
pub fn table_name(declared: Option<&str>, parent: &ParentType) -> String {
    match declared {
        Some(table) => table.to_string(),
        None => inflector::table_name_for(parent.basename()),
    }
}

/// Foreign key pointing at rows of this model: `<snake parent>_<primary key>`
pub fn foreign_key(parent: &ParentType, primary_key: &str) -> String {
    format!("{}_{}", inflector::snake_case(parent.basename()), primary_key)
}

/// Canonical pivot table for two relationship class names.
///
/// Both names are snake_cased and sorted lexically, so the result does not
/// depend on which side declares the relation.
pub fn joining_table_name(first: &str, second: &str) -> String {
    let mut models = [inflector::snake_case(first), inflector::snake_case(second)];
    models.sort();
    models.join("_").to_lowercase()
}

/// Class name recorded for serialized collections
pub fn serialization_class_name(parent: &ParentType) -> String {
    parent.name().to_string()
}
