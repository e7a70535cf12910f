//! Member classification for describable types
//!
//! A [`TypeDescriptor`] is the flattened view the resolver works with: wrappers are
//! peeled off, every member is tagged with a [`MemberKind`], and collection members
//! carry their element type.

use serde::Serialize;
use strum::{AsRefStr, Display};
use tracing::warn;

use super::describe::{MemberDef, ScalarKind, Shape, TypeRef};
use crate::constants::MAX_WRAPPER_DEPTH;

/// How the resolver may move through a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
pub enum MemberKind {
    /// Leaf value; nothing to descend into
    Scalar,
    /// Nested struct the resolver may descend into
    ComplexNested,
    /// Collection whose elements are leaves
    CollectionOfScalar,
    /// Collection whose elements are nested structs
    CollectionOfComplex,
}

impl MemberKind {
    /// Whether the member holds a collection
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::CollectionOfScalar | Self::CollectionOfComplex)
    }
}

/// Category of a value, used to check that a path can feed a destination member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
pub enum ValueClass {
    /// Boolean
    Bool,
    /// Integral number
    Integer,
    /// Floating point number
    Float,
    /// String or character
    Text,
    /// Not introspected; accepts any value
    Opaque,
    /// Struct with members
    Complex,
    /// Sequence or set
    Collection,
}

impl ValueClass {
    /// Whether a value of class `self` may be assigned to a member of class `destination`
    pub fn assignable_to(self, destination: Self) -> bool {
        self == destination
            || destination == Self::Opaque
            || (self == Self::Integer && destination == Self::Float)
    }
}

impl From<ScalarKind> for ValueClass {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool,
            ScalarKind::Integer => Self::Integer,
            ScalarKind::Float => Self::Float,
            ScalarKind::Text => Self::Text,
        }
    }
}

/// A type with its wrappers removed
#[derive(Debug, Clone)]
pub struct Unwrapped {
    /// Innermost non-wrapper type
    pub ty:       TypeRef,
    /// Its shape, already computed
    pub shape:    Shape,
    /// Whether any layer was an `Option`
    pub nullable: bool,
}

impl Unwrapped {
    /// Peel `Option`/`Box`/`Rc`/`Arc` layers off `ty`
    pub fn of(ty: TypeRef) -> Self {
        let mut current = ty;
        let mut shape = current.shape();
        let mut nullable = false;
        for _ in 0..MAX_WRAPPER_DEPTH {
            let Shape::Transparent {
                inner,
                nullable: layer_nullable,
            } = shape
            else {
                return Self {
                    ty: current,
                    shape,
                    nullable,
                };
            };
            nullable |= layer_nullable;
            current = inner;
            shape = current.shape();
        }
        warn!(
            type_name = %ty,
            "Wrapper chain too deep - treating type as opaque"
        );
        Self {
            ty: current,
            shape: Shape::Opaque,
            nullable,
        }
    }

    /// Value class of the unwrapped type
    pub fn class(&self) -> ValueClass {
        match &self.shape {
            Shape::Scalar(kind) => ValueClass::from(*kind),
            Shape::Opaque | Shape::Transparent { .. } => ValueClass::Opaque,
            Shape::Collection(_) => ValueClass::Collection,
            Shape::Complex(_) => ValueClass::Complex,
        }
    }
}

/// A member of a described type
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    /// Member identifier
    pub name:          &'static str,
    /// Type as declared, wrappers included
    pub declared:      TypeRef,
    /// Type after unwrapping; for collections, the collection type itself
    pub target:        TypeRef,
    /// Unwrapped element type of a collection member
    pub element:       Option<TypeRef>,
    /// Navigation kind
    pub kind:          MemberKind,
    /// Class of the member's own value
    pub class:         ValueClass,
    /// Class of one element, for collection members
    pub element_class: Option<ValueClass>,
    /// Whether the member may be absent
    pub nullable:      bool,
}

impl Member {
    fn classify(def: &MemberDef) -> Self {
        let unwrapped = Unwrapped::of(def.ty);
        let class = unwrapped.class();
        let (kind, element, element_class) = match &unwrapped.shape {
            Shape::Complex(_) => (MemberKind::ComplexNested, None, None),
            Shape::Collection(element) => {
                let element = Unwrapped::of(*element);
                let element_class = element.class();
                let kind = if matches!(element.shape, Shape::Complex(_)) {
                    MemberKind::CollectionOfComplex
                } else {
                    MemberKind::CollectionOfScalar
                };
                (kind, Some(element.ty), Some(element_class))
            }
            Shape::Scalar(_) | Shape::Opaque | Shape::Transparent { .. } => {
                (MemberKind::Scalar, None, None)
            }
        };

        Self {
            name: def.name,
            declared: def.ty,
            target: unwrapped.ty,
            element,
            kind,
            class,
            element_class,
            nullable: unwrapped.nullable,
        }
    }

    /// Type the resolver continues in after this member, if any
    pub const fn descend_type(&self) -> Option<TypeRef> {
        match self.kind {
            MemberKind::Scalar => None,
            MemberKind::ComplexNested => Some(self.target),
            MemberKind::CollectionOfScalar | MemberKind::CollectionOfComplex => self.element,
        }
    }
}

/// A type's name plus its ordered members
#[derive(Debug, Clone, Serialize)]
pub struct TypeDescriptor {
    ty:       TypeRef,
    class:    ValueClass,
    nullable: bool,
    members:  Vec<Member>,
}

impl TypeDescriptor {
    /// Classify `ty` and its members
    pub fn build(ty: TypeRef) -> Self {
        let unwrapped = Unwrapped::of(ty);
        let class = unwrapped.class();
        let members = match &unwrapped.shape {
            Shape::Complex(defs) => defs.iter().map(Member::classify).collect(),
            _ => Vec::new(),
        };

        Self {
            ty: unwrapped.ty,
            class,
            nullable: unwrapped.nullable,
            members,
        }
    }

    /// The described type, wrappers removed
    pub const fn type_ref(&self) -> TypeRef {
        self.ty
    }

    /// Diagnostic name
    pub const fn name(&self) -> &'static str {
        self.ty.name()
    }

    /// Value class of the type itself
    pub const fn class(&self) -> ValueClass {
        self.class
    }

    /// Whether the described type was reached through an `Option`
    pub const fn nullable(&self) -> bool {
        self.nullable
    }

    /// Members in declaration order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up a member by exact name
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Whether the type has members to map
    pub const fn is_complex(&self) -> bool {
        matches!(self.class, ValueClass::Complex)
    }
}
