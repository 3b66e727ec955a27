//! Query Builder SELECT, ORDER BY and pagination operations

use super::builder::QueryBuilder;
use super::types::*;

impl<M> QueryBuilder<M> {
    /// Select a comma-separated column list; `*` when never called
    pub fn select(mut self, columns: &str) -> Self {
        self.columns.extend(
            columns
                .split(',')
                .map(str::trim)
                .filter(|column| !column.is_empty())
                .map(String::from),
        );
        self
    }

    /// Replace the FROM table
    pub fn from(mut self, table: &str) -> Self {
        self.tables = vec![table.to_string()];
        self
    }

    fn ordered(mut self, column: &str, direction: OrderDirection) -> Self {
        self.ordering.push((column.to_string(), direction));
        self
    }

    pub fn order_by(self, column: &str) -> Self {
        self.ordered(column, OrderDirection::Asc)
    }

    pub fn order_by_desc(self, column: &str) -> Self {
        self.ordered(column, OrderDirection::Desc)
    }

    pub fn limit(mut self, count: i64) -> Self {
        self.limit = Some(count);
        self
    }

    pub fn offset(mut self, count: i64) -> Self {
        self.offset = Some(count);
        self
    }
}
