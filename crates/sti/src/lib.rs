//! # elif-sti: Single-table inheritance for elif.rs
//!
//! Several model types share one physical table. Each child declares its
//! parent with [`HasParent`]; table, foreign key, pivot table, morph tag and
//! serialization names are then derived from the parent, and children of an
//! STI root get a discriminator column stamped on create and filtered on
//! every query.
//!
//! This crate provides the inheritance core plus the thin host surface it
//! plugs into: the `Model` trait, an attribute bag, the query builder and an
//! event dispatcher for lifecycle hooks and global scopes.

pub mod alias;
pub mod config;
pub mod discriminator;
pub mod dispatcher;
pub mod error;
pub mod event_error;
pub mod events;
pub mod fillable;
pub mod has_parent;
pub mod identity;
pub mod inflector;
pub mod model;
pub mod naming;
pub mod query;

// Re-export core traits and types
pub use alias::ChildTypes;
pub use config::{ConfigError, ConfigSource, StiConfig};
pub use discriminator::{DiscriminatorObserver, DiscriminatorScope};
pub use dispatcher::{event_dispatcher, event_dispatcher_or_install, set_event_dispatcher, EventDispatcher};
pub use error::{StiError, StiResult};
pub use event_error::EventError;
pub use events::ModelObserver;
pub use fillable::FillableMerge;
pub use has_parent::HasParent;
pub use identity::ParentType;
pub use model::{Attributes, Model};
pub use query::{GlobalScope, QueryBuilder};
