//! The `HasParent` trait - models stored in their parent's table
//!
//! Implementing [`HasParent`] provides the parent-derived metadata; the
//! [`has_parent_overrides!`](crate::has_parent_overrides) macro, expanded
//! inside the model's `impl Model` block, routes the `Model` override points
//! to it.
//!
//! ```ignore
//! impl Model for Car {
//!     fn type_name() -> &'static str { "App\\Models\\Car" }
//!     // new_instance, attributes, attributes_mut ...
//!     elif_sti::has_parent_overrides!();
//! }
//!
//! impl HasParent for Car {
//!     type Parent = Vehicle;
//! }
//! ```

use std::sync::Arc;

use crate::alias::ChildTypes;
use crate::config::{self, StiConfig};
use crate::discriminator::{DiscriminatorObserver, DiscriminatorScope};
use crate::dispatcher::{self, EventDispatcher};
use crate::error::StiResult;
use crate::fillable::{self, FillableMerge};
use crate::identity::{self, ParentType};
use crate::model::Model;
use crate::naming;

/// A model sharing its parent's table
pub trait HasParent: Model {
    /// Immediate supertype; its table holds this model's rows
    type Parent: Model;

    fn parent() -> StiResult<Arc<ParentType>> {
        identity::resolve_parent::<Self, Self::Parent>()
    }

    /// Whether the parent is an STI root, enabling the discriminator
    fn parent_has_children() -> StiResult<bool> {
        Ok(Self::parent()?.has_children())
    }

    /// Name used for pivot tables; defaults to the parent's basename
    fn relationship_class_name() -> StiResult<String> {
        Ok(Self::parent()?.basename().to_string())
    }

    fn discriminator_alias() -> String {
        ChildTypes::of::<Self::Parent>().alias_of(Self::type_name())
    }

    /// Column declared by the parent, else the process-wide default
    fn discriminator_column() -> StiResult<String> {
        Self::discriminator_column_for(config::global())
    }

    /// Column declared by the parent, else the default from `config`
    fn discriminator_column_for(config: &StiConfig) -> StiResult<String> {
        let parent = Self::parent()?;
        Ok(parent
            .inheritance_column()
            .map(str::to_string)
            .unwrap_or_else(|| config.inheritance_column.clone()))
    }

    fn sti_table_name() -> StiResult<String> {
        let parent = Self::parent()?;
        Ok(naming::table_name(Self::declared_table(), &parent))
    }

    fn sti_foreign_key() -> StiResult<String> {
        let parent = Self::parent()?;
        Ok(naming::foreign_key(&parent, Self::primary_key_name()))
    }

    fn sti_joining_table<R: Model>() -> StiResult<String> {
        Ok(naming::joining_table_name(
            &R::class_name_for_relationships()?,
            &Self::class_name_for_relationships()?,
        ))
    }

    /// The parent's morph tag, read from a transient parent
    fn sti_morph_class() -> StiResult<String> {
        Self::parent()?;
        <Self::Parent as Model>::new_instance()?.morph_class()
    }

    fn sti_class_name_for_serialization() -> StiResult<String> {
        let parent = Self::parent()?;
        Ok(naming::serialization_class_name(&parent))
    }

    fn merged_fillable(&self) -> FillableMerge {
        fillable::merged_fillable::<Self, Self::Parent>(self)
    }

    /// Register the discriminator hook and scope on `dispatcher`
    fn boot_has_parent(dispatcher: &EventDispatcher) -> StiResult<()> {
        let parent = Self::parent()?;
        if parent.has_children() && dispatcher.config().strict_aliases {
            let aliases = ChildTypes::of::<Self::Parent>();
            aliases.validate()?;
            aliases.validate_member(Self::type_name())?;
        }

        let column = Self::discriminator_column_for(dispatcher.config())?;
        let observer = DiscriminatorObserver::<Self>::new(column.clone());
        let scope = DiscriminatorScope::<Self>::new(column.clone());
        dispatcher.observe::<Self>(Arc::new(observer));
        dispatcher.add_global_scope::<Self>(Arc::new(scope));

        tracing::debug!(
            model = Self::type_name(),
            parent = parent.name(),
            column = %column,
            "Registered discriminator hooks"
        );
        Ok(())
    }

    /// Boot on the process dispatcher, installing one if none is attached
    fn boot_standalone() -> StiResult<Arc<EventDispatcher>> {
        let dispatcher = dispatcher::event_dispatcher_or_install();
        dispatcher.boot::<Self>()?;
        Ok(dispatcher)
    }
}

/// Route a model's `Model` override points to its [`HasParent`] impl.
///
/// Expand inside `impl Model for X`; `X` must also implement `HasParent`.
#[macro_export]
macro_rules! has_parent_overrides {
    () => {
        fn table_name() -> $crate::StiResult<String> {
            <Self as $crate::HasParent>::sti_table_name()
        }

        fn foreign_key() -> $crate::StiResult<String> {
            <Self as $crate::HasParent>::sti_foreign_key()
        }

        fn class_name_for_relationships() -> $crate::StiResult<String> {
            <Self as $crate::HasParent>::relationship_class_name()
        }

        fn joining_table<R: $crate::Model>() -> $crate::StiResult<String> {
            <Self as $crate::HasParent>::sti_joining_table::<R>()
        }

        fn morph_class(&self) -> $crate::StiResult<String> {
            <Self as $crate::HasParent>::sti_morph_class()
        }

        fn class_name_for_serialization() -> $crate::StiResult<String> {
            <Self as $crate::HasParent>::sti_class_name_for_serialization()
        }

        fn get_fillable(&self) -> Vec<String> {
            <Self as $crate::HasParent>::merged_fillable(self).into_attributes()
        }

        fn boot(dispatcher: &$crate::EventDispatcher) -> $crate::StiResult<()> {
            <Self as $crate::HasParent>::boot_has_parent(dispatcher)
        }
    };
}
