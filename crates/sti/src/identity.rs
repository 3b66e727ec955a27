//! Parent identity resolution
//!
//! A child declares its parent statically; the first lookup inspects the
//! parent's metadata and stores a snapshot in a process-wide map keyed by the
//! `(child, parent)` pair of `TypeId`s, so a lookup against any other parent
//! never sees that snapshot. Hierarchies never change at runtime, so entries
//! are never invalidated. Concurrent first lookups may both compute the
//! snapshot; the first insert wins and both values are identical.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;

use crate::error::{StiError, StiResult};
use crate::inflector;
use crate::model::Model;

type CacheKey = (TypeId, TypeId);

static PARENT_CACHE: Lazy<DashMap<CacheKey, Arc<ParentType>>> = Lazy::new(DashMap::new);

/// Snapshot of a parent model's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentType {
    type_id: TypeId,
    name: &'static str,
    basename: String,
    primary_key: &'static str,
    has_children: bool,
    inheritance_column: Option<&'static str>,
}

impl ParentType {
    /// Inspect `P` as the parent of `C`
    fn inspect<C: Model, P: Model>() -> StiResult<Self> {
        if TypeId::of::<C>() == TypeId::of::<P>() {
            return Err(StiError::resolution(
                C::type_name(),
                "model declares itself as its parent",
            ));
        }

        let name = P::type_name();
        if name.trim().is_empty() {
            return Err(StiError::resolution(
                C::type_name(),
                "parent type has an empty name",
            ));
        }

        if P::is_abstract() {
            return Err(StiError::resolution(
                C::type_name(),
                format!("parent '{}' is abstract", name),
            ));
        }

        Ok(Self {
            type_id: TypeId::of::<P>(),
            name,
            basename: inflector::class_basename(name).to_string(),
            primary_key: P::primary_key_name(),
            has_children: P::has_children(),
            inheritance_column: P::inheritance_column(),
        })
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully-qualified parent name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parent name without its namespace
    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// Whether the parent is an STI root
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    /// Discriminator column declared by the parent, if any
    pub fn inheritance_column(&self) -> Option<&'static str> {
        self.inheritance_column
    }
}

/// Resolve (and cache) `P` as the parent of `C`
pub fn resolve_parent<C: Model, P: Model>() -> StiResult<Arc<ParentType>> {
    let key = (TypeId::of::<C>(), TypeId::of::<P>());
    if let Some(cached) = PARENT_CACHE.get(&key) {
        return Ok(Arc::clone(cached.value()));
    }

    let parent = Arc::new(ParentType::inspect::<C, P>()?);
    let entry = PARENT_CACHE.entry(key).or_insert(parent);
    tracing::trace!(
        model = C::type_name(),
        parent = entry.value().name(),
        "Cached parent type"
    );
    Ok(Arc::clone(entry.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attributes;

    fn is_cached<C: Model, P: Model>() -> bool {
        PARENT_CACHE.contains_key(&(TypeId::of::<C>(), TypeId::of::<P>()))
    }

    macro_rules! test_model {
        ($name:ident, $type_name:expr, abstract = $is_abstract:expr, root = $root:expr) => {
            #[derive(Debug, Default)]
            struct $name {
                attributes: Attributes,
            }

            impl Model for $name {
                fn type_name() -> &'static str {
                    $type_name
                }

                fn is_abstract() -> bool {
                    $is_abstract
                }

                fn has_children() -> bool {
                    $root
                }

                fn new_instance() -> StiResult<Self> {
                    Ok(Self::default())
                }

                fn attributes(&self) -> &Attributes {
                    &self.attributes
                }

                fn attributes_mut(&mut self) -> &mut Attributes {
                    &mut self.attributes
                }
            }
        };
    }

    test_model!(Vessel, "App\\Models\\Vessel", abstract = false, root = true);
    test_model!(Ferry, "App\\Models\\Ferry", abstract = false, root = false);
    test_model!(Tanker, "App\\Models\\Tanker", abstract = false, root = false);
    test_model!(Craft, "App\\Models\\Craft", abstract = true, root = true);
    test_model!(Glider, "App\\Models\\Glider", abstract = false, root = false);
    test_model!(Nameless, "  ", abstract = false, root = false);
    test_model!(Dinghy, "App\\Models\\Dinghy", abstract = false, root = false);

    #[test]
    fn test_resolves_and_caches_parent() {
        let parent = resolve_parent::<Ferry, Vessel>().unwrap();
        assert_eq!(parent.name(), "App\\Models\\Vessel");
        assert_eq!(parent.basename(), "Vessel");
        assert_eq!(parent.primary_key(), "id");
        assert!(parent.has_children());
        assert_eq!(parent.type_id(), TypeId::of::<Vessel>());
        assert!(is_cached::<Ferry, Vessel>());

        let again = resolve_parent::<Ferry, Vessel>().unwrap();
        assert!(Arc::ptr_eq(&parent, &again));
    }

    #[test]
    fn test_siblings_cache_independently() {
        let ferry = resolve_parent::<Ferry, Vessel>().unwrap();
        let tanker = resolve_parent::<Tanker, Vessel>().unwrap();

        assert_eq!(*ferry, *tanker);
        assert!(!Arc::ptr_eq(&ferry, &tanker));
    }

    #[test]
    fn test_abstract_parent_fails() {
        let err = resolve_parent::<Glider, Craft>().unwrap_err();
        assert!(err.is_resolution());
        assert!(err.to_string().contains("abstract"));
        assert!(!is_cached::<Glider, Craft>());
    }

    #[test]
    fn test_self_parent_fails() {
        assert!(resolve_parent::<Vessel, Vessel>().unwrap_err().is_resolution());
    }

    #[test]
    fn test_empty_parent_name_fails() {
        assert!(resolve_parent::<Dinghy, Nameless>().unwrap_err().is_resolution());
    }

    #[test]
    fn test_other_parent_does_not_shadow_declared_parent() {
        let wrong = resolve_parent::<Tanker, Ferry>().unwrap();
        assert_eq!(wrong.name(), "App\\Models\\Ferry");

        let declared = resolve_parent::<Tanker, Vessel>().unwrap();
        assert_eq!(declared.name(), "App\\Models\\Vessel");
        assert!(declared.has_children());
        assert!(is_cached::<Tanker, Ferry>());
        assert!(is_cached::<Tanker, Vessel>());
    }
}
