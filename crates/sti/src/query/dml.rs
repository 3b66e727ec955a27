//! Query Builder INSERT operations

use super::builder::QueryBuilder;
use super::types::*;
use serde_json::Value;

impl<M> QueryBuilder<M> {
    /// Start an INSERT query
    pub fn insert_into(mut self, table: &str) -> Self {
        self.query_type = QueryType::Insert;
        self.insert_table = Some(table.to_string());
        self
    }

    /// Set multiple values at once; JSON nulls become SQL NULL
    pub fn set_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (column, value) in values {
            let value = if value.is_null() { None } else { Some(value) };
            self.set_clauses.push(SetClause { column, value });
        }
        self
    }
}
