//! Query Builder Module - Fluent query builder with global scope support

pub mod builder;
pub mod dml;
pub mod scopes;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use scopes::GlobalScope;
pub use types::{OrderDirection, QueryOperator, QueryType, SetClause, WhereCondition};
