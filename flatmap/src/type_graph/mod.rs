mod compatibility;
mod describe;
mod descriptor;
mod inspector;

pub use compatibility::Compatibility;
pub use describe::{Describe, MemberDef, ScalarKind, Shape, TypeRef};
pub use descriptor::{Member, MemberKind, TypeDescriptor, Unwrapped, ValueClass};
pub use inspector::TypeInspector;
