//! Path resolver
//!
//! Resolves a destination member name to a [`NavigationPath`] over the source type
//! graph by repeatedly matching the longest member-name prefix of the residual name
//! and descending into the matched member's type. A collection member either maps
//! the rest of the path over its elements, or ends the path when the residual is an
//! aggregate operation name that no element member claims.

use serde::Serialize;
use tracing::trace;

use super::cycle_guard::CycleGuard;
use super::navigation_path::{CollectionOperation, Hop, NavigationPath};
use super::segment_matcher::match_segment;
use crate::config::NamingConvention;
use crate::type_graph::{MemberKind, TypeInspector, TypeRef, ValueClass};

/// Class and type of the value at the end of a descent
#[derive(Debug, Clone, Copy)]
struct Reached {
    class: ValueClass,
    ty:    TypeRef,
}

/// Where and why resolution stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stall {
    /// Part of the identifier that could not be consumed
    pub residual:  String,
    /// Type at which resolution stopped
    pub type_name: &'static str,
}

impl Stall {
    fn new(residual: &str, type_name: &'static str) -> Self {
        Self {
            residual: residual.to_string(),
            type_name,
        }
    }
}

/// Resolves destination member names against a source type
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    inspector:  &'a TypeInspector,
    convention: NamingConvention,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver reading descriptors from `inspector`
    pub const fn new(inspector: &'a TypeInspector, convention: NamingConvention) -> Self {
        Self {
            inspector,
            convention,
        }
    }

    /// Naming convention used to split identifiers
    pub const fn convention(&self) -> NamingConvention {
        self.convention
    }

    /// Resolve `member_name` starting at `root`
    pub fn resolve(&self, member_name: &str, root: TypeRef) -> Result<NavigationPath, Stall> {
        let mut guard = CycleGuard::new();
        let mut hops = Vec::new();
        let reached = self.descend(root, member_name, None, &mut guard, &mut hops)?;

        let result = if hops.iter().any(|hop| matches!(hop, Hop::Iterate)) {
            ValueClass::Collection
        } else {
            reached.class
        };
        Ok(NavigationPath::new(hops, result, reached.ty, self.convention))
    }

    /// Resolve only a same-named member of `root`, without descending
    pub fn resolve_identity(&self, member_name: &str, root: TypeRef) -> Option<NavigationPath> {
        let descriptor = self.inspector.describe(root);
        let member = descriptor.member(member_name)?;
        Some(NavigationPath::new(
            vec![Hop::Member {
                name:  member.name,
                owner: descriptor.type_ref(),
                kind:  member.kind,
            }],
            member.class,
            member.declared,
            self.convention,
        ))
    }

    /// Consume `residual` starting in `current`, appending hops.
    ///
    /// `element_class` is set when `current` is the element type of the collection
    /// member just read; the last hop is then the pending `Iterate`. Only nested-struct
    /// members enter the cycle guard, so an aggregate can still end a path whose
    /// element type is already on the branch.
    fn descend(
        &self,
        current: TypeRef,
        residual: &str,
        element_class: Option<ValueClass>,
        guard: &mut CycleGuard,
        hops: &mut Vec<Hop>,
    ) -> Result<Reached, Stall> {
        let descriptor = self.inspector.describe(current);

        let Some(found) = match_segment(residual, descriptor.members(), self.convention) else {
            if let Some(element_class) = element_class
                && let Some(operation) = CollectionOperation::parse(residual, self.convention)
            {
                if let Some(last) = hops.last_mut() {
                    *last = Hop::Aggregate { operation };
                }
                trace!(%operation, "Path terminated by collection operation");
                return Ok(Reached {
                    class: operation.result_class(element_class),
                    ty:    operation.result_type(current),
                });
            }
            return Err(Stall::new(residual, descriptor.name()));
        };

        let member = found.member;
        trace!(
            member = member.name,
            owner = descriptor.name(),
            kind = %member.kind,
            remaining = found.remaining,
            "Matched segment"
        );
        hops.push(Hop::Member {
            name:  member.name,
            owner: descriptor.type_ref(),
            kind:  member.kind,
        });

        if found.remaining.is_empty() {
            return Ok(Reached {
                class: member.class,
                ty:    member.declared,
            });
        }

        match member.kind {
            MemberKind::Scalar => Err(Stall::new(found.remaining, member.target.name())),
            MemberKind::ComplexNested => {
                self.descend_guarded(member.target, found.remaining, guard, hops)
            }
            MemberKind::CollectionOfScalar | MemberKind::CollectionOfComplex => {
                let Some(element) = member.element else {
                    return Err(Stall::new(found.remaining, member.target.name()));
                };
                let element_class = member.element_class.unwrap_or(ValueClass::Opaque);
                hops.push(Hop::Iterate);
                self.descend(element, found.remaining, Some(element_class), guard, hops)
            }
        }
    }

    fn descend_guarded(
        &self,
        target: TypeRef,
        residual: &str,
        guard: &mut CycleGuard,
        hops: &mut Vec<Hop>,
    ) -> Result<Reached, Stall> {
        if !guard.enter(target) {
            return Err(Stall::new(residual, target.name()));
        }
        let result = self.descend(target, residual, None, guard, hops);
        guard.leave(target);
        result
    }
}
