//! The describable-type contract
//!
//! A type takes part in mapping by implementing [`Describe`], usually through
//! `#[derive(Describe)]`. The returned [`Shape`] only names member types through
//! [`TypeRef`]s whose shapes are produced lazily, so self-referencing graphs
//! describe without recursion.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use strum::{AsRefStr, Display};

/// A type whose members can be enumerated for path resolution
pub trait Describe: 'static {
    /// Structural shape of the type
    fn shape() -> Shape;

    /// Name used in diagnostics
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Leaf value categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// Signed and unsigned integers
    Integer,
    /// `f32` and `f64`
    Float,
    /// Strings and `char`
    Text,
}

/// Structure of a describable type
#[derive(Debug, Clone)]
pub enum Shape {
    /// Primitive, string or other value-like leaf
    Scalar(ScalarKind),
    /// Leaf whose contents are not introspected (maps, enums, JSON values)
    Opaque,
    /// Wrapper classified by its inner type (`Option`, `Box`, `Rc`, `Arc`)
    Transparent {
        /// Wrapped type
        inner:    TypeRef,
        /// Whether the wrapper can be empty
        nullable: bool,
    },
    /// Sequence or set of elements
    Collection(TypeRef),
    /// Struct with named members in declaration order
    Complex(Vec<MemberDef>),
}

/// A named member as declared by a [`Shape::Complex`]
#[derive(Debug, Clone)]
pub struct MemberDef {
    /// Member identifier, equal to its serialized field name
    pub name: &'static str,
    /// Declared type
    pub ty:   TypeRef,
}

impl MemberDef {
    /// Create a member definition
    pub const fn new(name: &'static str, ty: TypeRef) -> Self {
        Self { name, ty }
    }
}

/// Identity of a describable type plus a lazy handle to its shape
#[derive(Clone, Copy)]
pub struct TypeRef {
    id:    TypeId,
    name:  &'static str,
    shape: fn() -> Shape,
}

impl TypeRef {
    /// Reference a describable type
    pub fn of<T: Describe>() -> Self {
        Self {
            id:    TypeId::of::<T>(),
            name:  T::type_name(),
            shape: T::shape,
        }
    }

    /// Type identity
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Diagnostic name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Compute the type's shape
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name)
    }
}

macro_rules! describe_scalar {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }
            }
        )+
    };
}

describe_scalar!(Bool => bool);
describe_scalar!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_scalar!(Float => f32, f64);
describe_scalar!(Text => char, String, &'static str);

impl Describe for () {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl Describe for serde_json::Value {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<T: Describe> Describe for Option<T> {
    fn shape() -> Shape {
        Shape::Transparent {
            inner:    TypeRef::of::<T>(),
            nullable: true,
        }
    }
}

macro_rules! describe_pointer {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Describe> Describe for $wrapper<T> {
                fn shape() -> Shape {
                    Shape::Transparent {
                        inner:    TypeRef::of::<T>(),
                        nullable: false,
                    }
                }
            }
        )+
    };
}

describe_pointer!(Box, Rc, Arc);

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::Collection(TypeRef::of::<T>())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Collection(TypeRef::of::<T>())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Collection(TypeRef::of::<T>())
    }
}

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn shape() -> Shape {
        Shape::Collection(TypeRef::of::<T>())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape() -> Shape {
        Shape::Collection(TypeRef::of::<T>())
    }
}

impl<K: 'static, V: 'static, S: 'static> Describe for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}

impl<K: 'static, V: 'static> Describe for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Opaque
    }
}
