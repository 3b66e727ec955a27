//! Model System - Host model trait and attribute storage
//!
//! - `core_trait`: Model trait with type metadata and naming override points
//! - `attributes`: Attribute bag with whitelist-gated mass assignment

pub mod attributes;
pub mod core_trait;

pub use attributes::Attributes;
pub use core_trait::Model;
