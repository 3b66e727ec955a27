//! Core Model Trait - Type metadata and override points for database entities
//!
//! Every naming method returns the conventional value by default. Models that
//! live in a shared table replace these defaults with the parent-derived
//! versions via [`has_parent_overrides!`](crate::has_parent_overrides).

use serde_json::Value;

use crate::error::StiResult;
use crate::dispatcher::{self, EventDispatcher};
use crate::inflector;
use crate::model::Attributes;
use crate::naming;
use crate::query::QueryBuilder;

/// Core trait for models participating in (or hosting) single-table inheritance
pub trait Model: Send + Sync + Sized + 'static {
    /// Fully-qualified type identifier
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Explicit table name, bypassing convention
    fn declared_table() -> Option<&'static str> {
        None
    }

    /// Primary key field name
    fn primary_key_name() -> &'static str {
        "id"
    }

    /// Abstract models cannot be instantiated or act as a resolved parent
    fn is_abstract() -> bool {
        false
    }

    /// Whether this model is an STI root whose children share its table
    fn has_children() -> bool {
        false
    }

    /// Explicit `(alias, type name)` pairs for the children of an STI root
    fn child_types() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Column holding the discriminator alias; `None` defers to the
    /// dispatcher's configuration
    fn inheritance_column() -> Option<&'static str> {
        None
    }

    /// Build a transient, empty instance used for metadata lookups
    fn new_instance() -> StiResult<Self>;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// The model's own mass-assignment whitelist
    fn fillable(&self) -> Vec<String> {
        Vec::new()
    }

    // Override points

    fn table_name() -> StiResult<String> {
        Ok(match Self::declared_table() {
            Some(table) => table.to_string(),
            None => inflector::table_name_for(Self::type_name()),
        })
    }

    fn foreign_key() -> StiResult<String> {
        Ok(inflector::foreign_key_for(
            Self::type_name(),
            Self::primary_key_name(),
        ))
    }

    /// Name used when deriving pivot tables
    fn class_name_for_relationships() -> StiResult<String> {
        Ok(inflector::class_basename(Self::type_name()).to_string())
    }

    /// Pivot table shared with `R` in a many-to-many relationship
    fn joining_table<R: Model>() -> StiResult<String> {
        Ok(naming::joining_table_name(
            &R::class_name_for_relationships()?,
            &Self::class_name_for_relationships()?,
        ))
    }

    /// Type tag stored alongside polymorphic foreign keys
    fn morph_class(&self) -> StiResult<String> {
        Ok(Self::type_name().to_string())
    }

    fn class_name_for_serialization() -> StiResult<String> {
        Ok(Self::type_name().to_string())
    }

    /// Effective mass-assignment whitelist
    fn get_fillable(&self) -> Vec<String> {
        self.fillable()
    }

    /// Register lifecycle hooks and global scopes; runs once per dispatcher
    fn boot(_dispatcher: &EventDispatcher) -> StiResult<()> {
        Ok(())
    }

    // Provided behaviour

    /// Mass-assign attributes through the effective whitelist
    fn fill<I>(&mut self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let allowed = self.get_fillable();
        let rejected = self.attributes_mut().fill(values, &allowed);
        if !rejected.is_empty() {
            tracing::debug!(
                model = Self::type_name(),
                "Discarded non-fillable attributes: {}",
                rejected.join(", ")
            );
        }
        rejected
    }

    fn force_fill<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.attributes_mut().force_fill(values);
    }

    fn get_attribute(&self, column: &str) -> Option<&Value> {
        self.attributes().get(column)
    }

    /// Start a query on the process dispatcher with every global scope applied
    fn query() -> StiResult<QueryBuilder<Self>> {
        dispatcher::event_dispatcher_or_install().query::<Self>()
    }
}
