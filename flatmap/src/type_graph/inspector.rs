//! Type descriptor cache
//!
//! Descriptors are built on first request and shared for the lifetime of the
//! inspector. Concurrent first requests may build the same descriptor twice; the
//! first insert wins and every caller receives that one.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::describe::{Describe, TypeRef};
use super::descriptor::TypeDescriptor;

/// Thread-safe cache of [`TypeDescriptor`]s keyed by type identity
#[derive(Debug, Default)]
pub struct TypeInspector {
    /// Map of requested type to its descriptor
    types: DashMap<TypeId, Arc<TypeDescriptor>>,
}

impl TypeInspector {
    /// Create a new empty inspector
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe `ty`, building and caching the descriptor on first use
    pub fn describe(&self, ty: TypeRef) -> Arc<TypeDescriptor> {
        if let Some(cached) = self.types.get(&ty.id()) {
            return Arc::clone(cached.value());
        }

        // Built outside the entry lock; describing never re-enters the cache.
        let built = Arc::new(TypeDescriptor::build(ty));
        let entry = self.types.entry(ty.id()).or_insert_with(|| {
            debug!(
                type_name = %ty,
                members = built.members().len(),
                "Cached type descriptor"
            );
            Arc::clone(&built)
        });
        Arc::clone(entry.value())
    }

    /// Describe a type by its Rust type
    pub fn describe_type<T: Describe>(&self) -> Arc<TypeDescriptor> {
        self.describe(TypeRef::of::<T>())
    }

    /// Number of cached descriptors
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing has been described yet
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Drop every cached descriptor
    pub fn clear(&self) {
        self.types.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::type_graph::describe::{MemberDef, Shape};

    struct Pair;

    impl Describe for Pair {
        fn shape() -> Shape {
            Shape::Complex(vec![
                MemberDef::new("left", TypeRef::of::<i64>()),
                MemberDef::new("right", TypeRef::of::<i64>()),
            ])
        }
    }

    #[test]
    fn test_describe_is_cached() {
        let inspector = TypeInspector::new();
        let first = inspector.describe_type::<Pair>();
        let second = inspector.describe_type::<Pair>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(inspector.len(), 1);
    }

    #[test]
    fn test_wrapped_and_bare_types_cache_separately() {
        let inspector = TypeInspector::new();
        let bare = inspector.describe_type::<Pair>();
        let wrapped = inspector.describe_type::<Option<Pair>>();
        assert!(!bare.nullable());
        assert!(wrapped.nullable());
        assert_eq!(bare.type_ref(), wrapped.type_ref());
        assert_eq!(inspector.len(), 2);
    }

    #[test]
    fn test_concurrent_first_access_converges() {
        let inspector = Arc::new(TypeInspector::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let inspector = Arc::clone(&inspector);
                thread::spawn(move || inspector.describe_type::<Pair>())
            })
            .collect();

        let descriptors: Vec<_> = handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect();
        assert_eq!(descriptors.len(), 8);
        let cached = inspector.describe_type::<Pair>();
        assert!(descriptors.iter().all(|d| Arc::ptr_eq(d, &cached)));
    }

    #[test]
    fn test_clear_empties_cache() {
        let inspector = TypeInspector::new();
        inspector.describe_type::<Pair>();
        assert!(!inspector.is_empty());
        inspector.clear();
        assert!(inspector.is_empty());
    }
}
