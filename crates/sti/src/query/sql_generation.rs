//! Query Builder SQL generation
//!
//! Values are bound as `$n` placeholders; parameters are returned in
//! placeholder order, strings unquoted.

use super::builder::QueryBuilder;
use super::types::*;
use serde_json::Value;

/// Collects bound parameters and hands out their placeholders
#[derive(Default)]
struct Binder {
    params: Vec<String>,
}

impl Binder {
    fn bind(&mut self, value: &Value) -> String {
        self.params.push(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        format!("${}", self.params.len())
    }
}

impl<M> QueryBuilder<M> {
    /// Generate SQL with placeholders and the parameters bound to them
    pub fn to_sql_with_params(&self) -> (String, Vec<String>) {
        let mut binder = Binder::default();
        let sql = match self.query_type {
            QueryType::Select => self.select_sql(&mut binder),
            QueryType::Insert => self.insert_sql(&mut binder),
        };
        (sql, binder.params)
    }

    pub fn to_sql(&self) -> String {
        self.to_sql_with_params().0
    }

    fn select_sql(&self, binder: &mut Binder) -> String {
        let fields = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };
        let mut sql = format!("SELECT {}", fields);

        if !self.tables.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&self.tables.join(", "));
        }

        let predicates: Vec<String> = self
            .where_conditions
            .iter()
            .map(|condition| Self::predicate_sql(condition, binder))
            .collect();
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if !self.ordering.is_empty() {
            let parts: Vec<String> = self
                .ordering
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&parts.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }

    fn predicate_sql(condition: &WhereCondition, binder: &mut Binder) -> String {
        let lhs = format!("{} {}", condition.column, condition.operator);
        match condition.operator {
            // An empty list matches nothing for IN and everything for NOT IN
            QueryOperator::In if condition.values.is_empty() => "1 = 0".to_string(),
            QueryOperator::NotIn if condition.values.is_empty() => "1 = 1".to_string(),
            QueryOperator::In | QueryOperator::NotIn => {
                let placeholders: Vec<String> =
                    condition.values.iter().map(|value| binder.bind(value)).collect();
                format!("{} ({})", lhs, placeholders.join(", "))
            }
            QueryOperator::IsNull | QueryOperator::IsNotNull => lhs,
            QueryOperator::Equal | QueryOperator::NotEqual => match &condition.value {
                Some(value) => format!("{} {}", lhs, binder.bind(value)),
                None => lhs,
            },
        }
    }

    fn insert_sql(&self, binder: &mut Binder) -> String {
        let Some(table) = &self.insert_table else {
            return String::new();
        };

        let mut sql = format!("INSERT INTO {}", table);
        if self.set_clauses.is_empty() {
            return sql;
        }

        let columns: Vec<&str> = self
            .set_clauses
            .iter()
            .map(|clause| clause.column.as_str())
            .collect();
        let values: Vec<String> = self
            .set_clauses
            .iter()
            .map(|clause| match &clause.value {
                Some(value) => binder.bind(value),
                None => "NULL".to_string(),
            })
            .collect();

        sql.push_str(&format!(" ({}) VALUES ({})", columns.join(", "), values.join(", ")));
        sql
    }
}
