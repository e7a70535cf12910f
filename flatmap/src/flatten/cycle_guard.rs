//! Cycle guard for one descent branch
//!
//! Tracks the types entered through nested-struct members while resolving a single
//! destination member. The root type is not entered, so a member referring back to
//! its own type is followed once; entering it again is refused. Collection element
//! types are not entered: each element hop consumes part of the identifier, so
//! descent through collections always terminates.

use std::any::TypeId;
use std::collections::HashSet;

use tracing::trace;

use crate::type_graph::TypeRef;

/// Types entered on the current branch
#[derive(Debug, Default)]
pub struct CycleGuard {
    entered: HashSet<TypeId>,
}

impl CycleGuard {
    /// Create an empty guard for a new branch
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to enter `ty`; returns `false` if it is already on the branch
    pub fn enter(&mut self, ty: TypeRef) -> bool {
        let allowed = self.entered.insert(ty.id());
        if !allowed {
            trace!(type_name = %ty, "Cycle guard refused re-entry");
        }
        allowed
    }

    /// Leave `ty` when its descent returns
    pub fn leave(&mut self, ty: TypeRef) {
        self.entered.remove(&ty.id());
    }

    /// Whether `ty` is currently on the branch
    pub fn contains(&self, ty: TypeRef) -> bool {
        self.entered.contains(&ty.id())
    }
}
