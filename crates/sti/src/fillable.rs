//! Mass-assignment whitelist merging
//!
//! A child accepts everything its parent accepts plus its own fields. The
//! merge never fails: when the parent cannot be consulted the child falls
//! back to its own list and the cause is kept alongside.

use crate::error::StiError;
use crate::identity;
use crate::model::Model;

/// Outcome of merging a child's fillable list with its parent's
#[derive(Debug, Clone)]
pub enum FillableMerge {
    /// Parent fields first, then the child's own, without duplicates
    Merged(Vec<String>),
    /// The parent could not be consulted; only the own list applies
    Degraded { own: Vec<String>, reason: StiError },
}

impl FillableMerge {
    /// Effective whitelist
    pub fn attributes(&self) -> &[String] {
        match self {
            FillableMerge::Merged(fields) => fields,
            FillableMerge::Degraded { own, .. } => own,
        }
    }

    pub fn into_attributes(self) -> Vec<String> {
        match self {
            FillableMerge::Merged(fields) => fields,
            FillableMerge::Degraded { own, .. } => own,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FillableMerge::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&StiError> {
        match self {
            FillableMerge::Merged(_) => None,
            FillableMerge::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Union of two whitelists in first-occurrence order
pub fn merge_fillable(parent: Vec<String>, own: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(parent.len() + own.len());
    for field in parent.into_iter().chain(own) {
        if !merged.contains(&field) {
            merged.push(field);
        }
    }
    merged
}

/// Merge `model`'s own whitelist with that of a transient `P`
pub fn merged_fillable<C: Model, P: Model>(model: &C) -> FillableMerge {
    let own = model.fillable();
    let parent_fillable = identity::resolve_parent::<C, P>()
        .and_then(|_| P::new_instance())
        .map(|parent| parent.get_fillable());

    match parent_fillable {
        Ok(parent) => FillableMerge::Merged(merge_fillable(parent, own)),
        Err(reason) => {
            tracing::debug!(
                model = C::type_name(),
                error = %reason,
                "Parent fillable unavailable; using own fillable only"
            );
            FillableMerge::Degraded { own, reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StiResult;
    use crate::model::Attributes;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[derive(Debug, Default)]
    struct Account {
        attributes: Attributes,
    }

    impl Model for Account {
        fn type_name() -> &'static str {
            "App\\Models\\Account"
        }

        fn has_children() -> bool {
            true
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

        fn fillable(&self) -> Vec<String> {
            fields(&["name", "email"])
        }
    }

    #[derive(Debug, Default)]
    struct Admin {
        attributes: Attributes,
    }

    impl Model for Admin {
        fn type_name() -> &'static str {
            "App\\Models\\Admin"
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

        fn fillable(&self) -> Vec<String> {
            fields(&["email", "permissions"])
        }
    }

    #[derive(Debug, Default)]
    struct Sealed {
        attributes: Attributes,
    }

    impl Model for Sealed {
        fn type_name() -> &'static str {
            "App\\Models\\Sealed"
        }

        fn new_instance() -> StiResult<Self> {
            Err(StiError::instantiation(Self::type_name(), "constructor unavailable"))
        }

        fn attributes(&self) -> &Attributes {
            &self.attributes
        }

        fn attributes_mut(&mut self) -> &mut Attributes {
            &mut self.attributes
        }

        fn fillable(&self) -> Vec<String> {
            fields(&["secret"])
        }
    }

    #[test]
    fn test_merge_keeps_parent_order_and_dedupes() {
        let merged = merge_fillable(fields(&["name", "email"]), fields(&["email", "permissions"]));
        assert_eq!(merged, fields(&["name", "email", "permissions"]));
    }

    #[test]
    fn test_merge_with_empty_sides() {
        assert_eq!(merge_fillable(Vec::new(), fields(&["a"])), fields(&["a"]));
        assert_eq!(merge_fillable(fields(&["a"]), Vec::new()), fields(&["a"]));
        assert!(merge_fillable(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_merged_fillable_unions_parent() {
        let merge = merged_fillable::<Admin, Account>(&Admin::default());
        assert!(!merge.is_degraded());
        assert!(merge.reason().is_none());
        assert_eq!(merge.attributes(), fields(&["name", "email", "permissions"]).as_slice());
    }

    #[test]
    fn test_uninstantiable_parent_degrades_to_own() {
        let merge = merged_fillable::<Admin, Sealed>(&Admin::default());
        assert!(merge.is_degraded());
        assert!(matches!(merge.reason(), Some(StiError::Instantiation { .. })));
        assert_eq!(merge.into_attributes(), fields(&["email", "permissions"]));
    }

    #[test]
    fn test_self_parent_degrades_to_own() {
        let merge = merged_fillable::<Account, Account>(&Account::default());
        assert!(merge.reason().is_some_and(StiError::is_resolution));
        assert_eq!(merge.attributes(), fields(&["name", "email"]).as_slice());
    }
}
