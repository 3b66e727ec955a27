//! Discriminator enforcement
//!
//! Children of an STI root always write their alias into the inheritance
//! column and only ever read rows carrying it. Children of a plain parent
//! share the table without either constraint.

use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;

use crate::error::StiResult;
use crate::event_error::EventError;
use crate::events::ModelObserver;
use crate::has_parent::HasParent;
use crate::query::{GlobalScope, QueryBuilder};

/// Name under which the discriminator scope is registered
pub const DISCRIMINATOR_SCOPE: &str = "elif_sti.discriminator";

/// Write the discriminator alias into `column`, overwriting any existing value.
///
/// Returns whether the column was stamped.
pub fn stamp_discriminator<C: HasParent>(model: &mut C, column: &str) -> StiResult<bool> {
    if !C::parent_has_children()? {
        return Ok(false);
    }

    let alias = C::discriminator_alias();
    model.force_fill([(column.to_string(), Value::String(alias))]);
    Ok(true)
}

/// Restrict `query` to rows of `C`
pub fn constrain_query<C: HasParent>(
    query: QueryBuilder<C>,
    column: &str,
) -> StiResult<QueryBuilder<C>> {
    if !C::parent_has_children()? {
        return Ok(query);
    }

    let qualified = format!("{}.{}", C::table_name()?, column);
    Ok(query.where_eq(&qualified, C::discriminator_alias()))
}

/// `creating` hook stamping the discriminator
pub struct DiscriminatorObserver<C> {
    column: String,
    _model: PhantomData<fn() -> C>,
}

impl<C> DiscriminatorObserver<C> {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            _model: PhantomData,
        }
    }
}

#[async_trait]
impl<C: HasParent> ModelObserver<C> for DiscriminatorObserver<C> {
    async fn creating(&self, model: &mut C) -> Result<(), EventError> {
        stamp_discriminator(model, &self.column)
            .map(|_| ())
            .map_err(|e| EventError::observer(&e.to_string()))
    }
}

/// Global scope filtering queries down to the rows of `C`
pub struct DiscriminatorScope<C> {
    column: String,
    _model: PhantomData<fn() -> C>,
}

impl<C> DiscriminatorScope<C> {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            _model: PhantomData,
        }
    }
}

impl<C: HasParent> GlobalScope<C> for DiscriminatorScope<C> {
    fn name(&self) -> &str {
        DISCRIMINATOR_SCOPE
    }

    fn apply(&self, query: QueryBuilder<C>) -> StiResult<QueryBuilder<C>> {
        constrain_query(query, &self.column)
    }
}
