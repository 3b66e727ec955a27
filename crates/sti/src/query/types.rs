//! Query Builder Types - Core types and enums for query building

use serde_json::Value;
use std::fmt;

/// Query operator types
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl QueryOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            QueryOperator::Equal => "=",
            QueryOperator::NotEqual => "!=",
            QueryOperator::In => "IN",
            QueryOperator::NotIn => "NOT IN",
            QueryOperator::IsNull => "IS NULL",
            QueryOperator::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One predicate of a WHERE clause; all predicates are ANDed
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    pub column: String,
    pub operator: QueryOperator,
    pub value: Option<Value>,
    /// Right-hand list for `IN` / `NOT IN`
    pub values: Vec<Value>,
}

impl WhereCondition {
    pub(crate) fn compare(column: &str, operator: QueryOperator, value: Value) -> Self {
        Self {
            column: column.to_string(),
            operator,
            value: Some(value),
            values: Vec::new(),
        }
    }

    pub(crate) fn membership(column: &str, operator: QueryOperator, values: Vec<Value>) -> Self {
        Self {
            column: column.to_string(),
            operator,
            value: None,
            values,
        }
    }

    pub(crate) fn nullity(column: &str, operator: QueryOperator) -> Self {
        Self::membership(column, operator, Vec::new())
    }
}

/// Order by direction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Query types supported by the builder
#[derive(Debug, Clone, PartialEq)]
pub enum QueryType {
    Select,
    Insert,
}

/// Set clause for INSERT operations
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub column: String,
    pub value: Option<Value>, // None for NULL values
}
