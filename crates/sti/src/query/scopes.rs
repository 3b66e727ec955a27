//! Global scopes - filters applied to every query built for a model

use super::builder::QueryBuilder;
use crate::error::StiResult;

/// A query constraint registered against a model type
pub trait GlobalScope<M>: Send + Sync {
    /// Unique name; a query never receives the same scope twice
    fn name(&self) -> &str;

    fn apply(&self, query: QueryBuilder<M>) -> StiResult<QueryBuilder<M>>;
}

impl<M> QueryBuilder<M> {
    /// Apply a global scope once; repeated applications are no-ops
    pub fn with_global_scope(mut self, scope: &dyn GlobalScope<M>) -> StiResult<Self> {
        if self.has_scope(scope.name()) {
            return Ok(self);
        }

        let name = scope.name().to_string();
        self = scope.apply(self)?;
        self.applied_scopes.push(name);
        Ok(self)
    }

    pub fn has_scope(&self, name: &str) -> bool {
        self.applied_scopes.iter().any(|applied| applied == name)
    }
}
