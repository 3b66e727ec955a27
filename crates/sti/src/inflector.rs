//! Naming helpers - class basenames, snake_case and English pluralization
//!
//! Type identifiers may use either `\` (`App\Models\Car`) or `::`
//! (`app::models::Car`) as the namespace separator.

use convert_case::{Case, Casing};

/// Strip the namespace from a fully-qualified type name
pub fn class_basename(type_name: &str) -> &str {
    let after_backslash = type_name.rsplit('\\').next().unwrap_or(type_name);
    after_backslash.rsplit("::").next().unwrap_or(after_backslash)
}

/// Remove any namespace separator characters left in a name
pub fn strip_namespace_separators(name: &str) -> String {
    name.chars().filter(|c| *c != '\\' && *c != ':').collect()
}

/// Convert an identifier to snake_case
pub fn snake_case(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// Simple pluralization (English-centric)
pub fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with('y')
        && !lower.ends_with("ay")
        && !lower.ends_with("ey")
        && !lower.ends_with("iy")
        && !lower.ends_with("oy")
        && !lower.ends_with("uy")
    {
        format!("{}ies", &name[..name.len() - 1])
    } else if lower.ends_with('s')
        || lower.ends_with("sh")
        || lower.ends_with("ch")
        || lower.ends_with('x')
        || lower.ends_with('z')
    {
        format!("{}es", name)
    } else {
        format!("{}s", name)
    }
}

/// Conventional table name for a type: plural snake_case of its basename
pub fn table_name_for(type_name: &str) -> String {
    let snake = snake_case(class_basename(type_name));
    strip_namespace_separators(&pluralize(&snake))
}

/// Conventional foreign key for a type: `<snake basename>_<primary key>`
pub fn foreign_key_for(type_name: &str, primary_key: &str) -> String {
    format!("{}_{}", snake_case(class_basename(type_name)), primary_key)
}
