//! Query Builder WHERE clause operations

use super::builder::QueryBuilder;
use super::types::*;
use serde_json::Value;

impl<M> QueryBuilder<M> {
    fn push_condition(mut self, condition: WhereCondition) -> Self {
        self.where_conditions.push(condition);
        self
    }

    /// Add `column = value`; a null value becomes `IS NULL`
    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        match value.into() {
            Value::Null => self.where_null(column),
            value => self.push_condition(WhereCondition::compare(column, QueryOperator::Equal, value)),
        }
    }

    /// Add `column != value`; a null value becomes `IS NOT NULL`
    pub fn where_ne<T: Into<Value>>(self, column: &str, value: T) -> Self {
        match value.into() {
            Value::Null => self.where_not_null(column),
            value => {
                self.push_condition(WhereCondition::compare(column, QueryOperator::NotEqual, value))
            }
        }
    }

    /// Add `column IN (...)`
    pub fn where_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push_condition(WhereCondition::membership(column, QueryOperator::In, values))
    }

    pub fn where_not_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push_condition(WhereCondition::membership(column, QueryOperator::NotIn, values))
    }

    pub fn where_null(self, column: &str) -> Self {
        self.push_condition(WhereCondition::nullity(column, QueryOperator::IsNull))
    }

    pub fn where_not_null(self, column: &str) -> Self {
        self.push_condition(WhereCondition::nullity(column, QueryOperator::IsNotNull))
    }
}
