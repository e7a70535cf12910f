//! # flatmap
//!
//! A convention-based object mapper. A destination member such as
//! `son_grandson_my_int` is bound, at compile time, to the source path
//! `son.grandson.my_int` by matching member-name prefixes through the source type
//! graph. A collection member followed by `count`, `long_count`, `any` or
//! `first_or_default` resolves to that aggregate over the collection.
//!
//! ```ignore
//! use flatmap::{Describe, Mapper, Registration};
//!
//! let mut mapper = Mapper::new();
//! mapper.register(Registration::<Father, FatherDto>::new().flatten_source());
//! mapper.compile()?;
//! let dto: FatherDto = mapper.map(&father)?;
//! ```

extern crate self as flatmap;

mod binding;
mod compiler;
mod config;
mod constants;
mod error;
mod flatten;
mod mapper;
mod registration;
mod type_graph;

pub use binding::{Binding, BindingMerger, MemberBinding};
pub use compiler::{
    AbsentElement, CompiledAccessor, CompiledMapping, MemberPlan, PathCompiler, PlannedBinding,
    walk,
};
pub use config::{MapperConfig, NamingConvention};
pub use error::{Error, Result};
pub use flatten::{
    CollectionOperation, CycleGuard, Hop, NavigationPath, PathResolver, SegmentMatch, Stall,
    match_segment, strip_segment,
};
/// Derives [`Describe`] for a struct; see the `flatmap_macros` crate for attributes.
pub use flatmap_macros::Describe;
pub use mapper::Mapper;
pub use registration::{OverrideFn, Registration};
pub use type_graph::{
    Compatibility, Describe, Member, MemberDef, MemberKind, ScalarKind, Shape, TypeDescriptor,
    TypeInspector, TypeRef, Unwrapped, ValueClass,
};
