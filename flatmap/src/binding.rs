//! Binding merger
//!
//! Decides, for each destination member in declaration order, where its value
//! comes from: an ignore, an explicit override, or a resolved navigation path.

use std::fmt;

use error_stack::Report;
use tracing::debug;

use crate::error::{Error, Result};
use crate::flatten::{Hop, NavigationPath, PathResolver, Stall};
use crate::registration::{OverrideFn, Registration};
use crate::type_graph::{Compatibility, Describe, Member, TypeDescriptor, TypeRef};

/// Source of one destination member's value after merging
pub enum Binding<S> {
    /// Explicit accessor declared on the registration
    Override(OverrideFn<S>),
    /// Intentionally left unassigned
    Ignore,
    /// Convention path over the source graph
    Resolved(NavigationPath),
    /// Flattening disabled and no same-named source member
    Unmapped,
    /// Flattening found no usable path
    Unresolved(Stall),
}

impl<S> Binding<S> {
    /// Short label for logs and plans
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Override(_) => "override",
            Self::Ignore => "ignore",
            Self::Resolved(_) => "resolved",
            Self::Unmapped => "unmapped",
            Self::Unresolved(_) => "unresolved",
        }
    }
}

impl<S> fmt::Debug for Binding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(_) => f.write_str("Override(<fn>)"),
            Self::Ignore => f.write_str("Ignore"),
            Self::Resolved(path) => f.debug_tuple("Resolved").field(path).finish(),
            Self::Unmapped => f.write_str("Unmapped"),
            Self::Unresolved(stall) => f.debug_tuple("Unresolved").field(stall).finish(),
        }
    }
}

/// A destination member with its merged binding
#[derive(Debug)]
pub struct MemberBinding<S> {
    /// Destination member name
    pub member:  &'static str,
    /// Where its value comes from
    pub binding: Binding<S>,
}

/// Merges registration declarations with convention-based resolution
#[derive(Debug, Clone, Copy)]
pub struct BindingMerger<'a> {
    resolver: PathResolver<'a>,
}

impl<'a> BindingMerger<'a> {
    /// Create a merger resolving through `resolver`
    pub const fn new(resolver: PathResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Produce exactly one binding per member of `destination`
    pub fn merge<S: Describe, D: Describe>(
        &self,
        registration: &Registration<S, D>,
        destination: &TypeDescriptor,
        flatten: bool,
    ) -> Result<Vec<MemberBinding<S>>> {
        if let Some(unknown) = registration
            .declared_members()
            .find(|name| destination.member(name).is_none())
        {
            return Err(Report::new(Error::UnknownMember {
                member:    unknown.to_string(),
                type_name: destination.name().to_string(),
            }));
        }

        let source = TypeRef::of::<S>();
        let bindings = destination
            .members()
            .iter()
            .map(|member| {
                let binding = self.bind(registration, source, member, flatten);
                debug!(
                    member = member.name,
                    binding = binding.label(),
                    "Merged destination member"
                );
                MemberBinding {
                    member: member.name,
                    binding,
                }
            })
            .collect();
        Ok(bindings)
    }

    fn bind<S: Describe, D: Describe>(
        &self,
        registration: &Registration<S, D>,
        source: TypeRef,
        member: &Member,
        flatten: bool,
    ) -> Binding<S> {
        if registration.is_ignored(member.name) {
            return Binding::Ignore;
        }
        if let Some(accessor) = registration.override_for(member.name) {
            return Binding::Override(accessor.clone());
        }

        if !flatten {
            return match self.resolver.resolve_identity(member.name, source) {
                Some(path) if fits(&path, member) => Binding::Resolved(path),
                _ => Binding::Unmapped,
            };
        }

        match self.resolver.resolve(member.name, source) {
            Ok(path) if fits(&path, member) => Binding::Resolved(path),
            Ok(path) => {
                debug!(
                    member = member.name,
                    path = %path,
                    produces = %path.produces(),
                    iterations = path.iterations(),
                    expects = %member.declared,
                    "Resolved path does not fit destination member"
                );
                Binding::Unresolved(Stall {
                    residual:  self.last_segment(&path),
                    type_name: member.target.name(),
                })
            }
            Err(stall) => Binding::Unresolved(stall),
        }
    }

    /// Final consumed segment of `path`, spelled as in the destination name
    fn last_segment(&self, path: &NavigationPath) -> String {
        match path.hops().last() {
            Some(Hop::Aggregate { operation }) => operation.name(self.resolver.convention()),
            Some(Hop::Member { name, .. }) => (*name).to_string(),
            Some(Hop::Iterate) | None => String::new(),
        }
    }
}

/// Whether what `path` produces can populate `member`, element by element when the
/// path iterates
fn fits(path: &NavigationPath, member: &Member) -> bool {
    Compatibility::new().fits_path(path.produces(), path.iterations(), member.declared)
}
