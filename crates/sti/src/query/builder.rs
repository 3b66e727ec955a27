//! Query Builder - the by-value fluent builder shared by every query kind

use std::marker::PhantomData;

use super::types::*;

/// Query under construction for model `M`.
///
/// `M` only tags the query so global scopes registered for one model can't
/// be applied to another model's query.
#[derive(Debug)]
pub struct QueryBuilder<M = ()> {
    pub(crate) query_type: QueryType,
    pub(crate) columns: Vec<String>,
    pub(crate) tables: Vec<String>,
    pub(crate) insert_table: Option<String>,
    pub(crate) set_clauses: Vec<SetClause>,
    pub(crate) where_conditions: Vec<WhereCondition>,
    pub(crate) ordering: Vec<(String, OrderDirection)>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
    pub(crate) applied_scopes: Vec<String>,
    _model: PhantomData<fn() -> M>,
}

// Manual impl: deriving would require `M: Clone`
impl<M> Clone for QueryBuilder<M> {
    fn clone(&self) -> Self {
        Self {
            query_type: self.query_type.clone(),
            columns: self.columns.clone(),
            tables: self.tables.clone(),
            insert_table: self.insert_table.clone(),
            set_clauses: self.set_clauses.clone(),
            where_conditions: self.where_conditions.clone(),
            ordering: self.ordering.clone(),
            limit: self.limit,
            offset: self.offset,
            applied_scopes: self.applied_scopes.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> Default for QueryBuilder<M> {
    fn default() -> Self {
        Self {
            query_type: QueryType::Select,
            columns: Vec::new(),
            tables: Vec::new(),
            insert_table: None,
            set_clauses: Vec::new(),
            where_conditions: Vec::new(),
            ordering: Vec::new(),
            limit: None,
            offset: None,
            applied_scopes: Vec::new(),
            _model: PhantomData,
        }
    }
}

impl<M> QueryBuilder<M> {
    /// An empty SELECT
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_type(&self) -> &QueryType {
        &self.query_type
    }

    /// Tables named in FROM
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn insert_table(&self) -> Option<&str> {
        self.insert_table.as_deref()
    }

    pub fn where_conditions(&self) -> &[WhereCondition] {
        &self.where_conditions
    }

    pub fn set_clauses(&self) -> &[SetClause] {
        &self.set_clauses
    }

    /// Names of the global scopes already applied to this query
    pub fn applied_scopes(&self) -> &[String] {
        &self.applied_scopes
    }
}
