//! Navigation paths produced by the resolver
//!
//! A path is a sequence of [`Hop`]s from the source root: member reads, per-element
//! iteration over a collection member, and at most one terminal aggregate.

use std::fmt;

use heck::ToSnakeCase;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::config::NamingConvention;
use crate::constants::{OPERATION_DISPLAY_SUFFIX, PATH_DISPLAY_SEPARATOR};
use crate::type_graph::{MemberKind, TypeRef, ValueClass};

/// Aggregate recognised as the last segment after a collection member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumIter)]
pub enum CollectionOperation {
    /// Number of elements
    Count,
    /// Number of elements (wide)
    LongCount,
    /// Whether the collection has any element
    Any,
    /// First element, or absent when empty
    FirstOrDefault,
}

impl CollectionOperation {
    /// Spelling of the operation under `convention`
    pub fn name(self, convention: NamingConvention) -> String {
        match convention {
            NamingConvention::PascalCase => self.as_ref().to_string(),
            NamingConvention::SnakeCase => self.as_ref().to_snake_case(),
        }
    }

    /// Recognise `segment` as an operation name
    pub fn parse(segment: &str, convention: NamingConvention) -> Option<Self> {
        Self::iter().find(|op| op.name(convention) == segment)
    }

    /// Class of the value the operation produces over elements of `element_class`
    pub const fn result_class(self, element_class: ValueClass) -> ValueClass {
        match self {
            Self::Count | Self::LongCount => ValueClass::Integer,
            Self::Any => ValueClass::Bool,
            Self::FirstOrDefault => element_class,
        }
    }

    /// Type of the value produced over elements of type `element`
    pub fn result_type(self, element: TypeRef) -> TypeRef {
        match self {
            Self::Count | Self::LongCount => TypeRef::of::<u64>(),
            Self::Any => TypeRef::of::<bool>(),
            Self::FirstOrDefault => element,
        }
    }

    /// Value produced when the collection itself is absent
    pub fn neutral(self) -> Value {
        match self {
            Self::Count | Self::LongCount => Value::from(0_u64),
            Self::Any => Value::Bool(false),
            Self::FirstOrDefault => Value::Null,
        }
    }

    /// Apply the operation to the elements of a collection
    pub fn apply(self, elements: &[Value]) -> Value {
        match self {
            Self::Count | Self::LongCount => Value::from(elements.len() as u64),
            Self::Any => Value::Bool(!elements.is_empty()),
            Self::FirstOrDefault => elements.first().cloned().unwrap_or(Value::Null),
        }
    }
}

/// One step of a navigation path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "hop", rename_all = "snake_case")]
pub enum Hop {
    /// Read a member of the current object
    Member {
        /// Member identifier
        name:  &'static str,
        /// Type declaring the member
        owner: TypeRef,
        /// How the member was classified
        kind:  MemberKind,
    },
    /// Apply the rest of the path to each element of the current collection
    Iterate,
    /// Reduce the current collection to a single value
    Aggregate {
        /// The recognised operation
        operation: CollectionOperation,
    },
}

/// A resolved route from a source root to a destination value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationPath {
    hops:       Vec<Hop>,
    result:     ValueClass,
    produces:   TypeRef,
    convention: NamingConvention,
}

impl NavigationPath {
    /// Create a path.
    ///
    /// `result` is the class of the whole value; `produces` is the type reached at the
    /// end of the hops, per element when the path iterates.
    pub const fn new(
        hops: Vec<Hop>,
        result: ValueClass,
        produces: TypeRef,
        convention: NamingConvention,
    ) -> Self {
        Self {
            hops,
            result,
            produces,
            convention,
        }
    }

    /// Hops from the root
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Class of the produced value
    pub const fn result(&self) -> ValueClass {
        self.result
    }

    /// Type reached at the end of the path; one element's type when it iterates
    pub const fn produces(&self) -> TypeRef {
        self.produces
    }

    /// Convention the path was resolved under
    pub const fn convention(&self) -> NamingConvention {
        self.convention
    }

    /// Terminal aggregate, if the path ends in one
    pub fn operation(&self) -> Option<CollectionOperation> {
        match self.hops.last() {
            Some(Hop::Aggregate { operation }) => Some(*operation),
            _ => None,
        }
    }

    /// Whether the path maps over collection elements
    pub fn iterates(&self) -> bool {
        self.iterations() > 0
    }

    /// Number of collection layers the path maps over
    pub fn iterations(&self) -> usize {
        self.hops
            .iter()
            .filter(|hop| matches!(hop, Hop::Iterate))
            .count()
    }

    /// Number of member reads
    pub fn depth(&self) -> usize {
        self.hops
            .iter()
            .filter(|hop| matches!(hop, Hop::Member { .. }))
            .count()
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<String> = Vec::with_capacity(self.hops.len());
        for hop in &self.hops {
            match hop {
                Hop::Member { name, .. } => segments.push((*name).to_string()),
                Hop::Iterate => {
                    if let Some(last) = segments.last_mut() {
                        last.push_str("[*]");
                    }
                }
                Hop::Aggregate { operation } => {
                    let name = operation.name(self.convention);
                    segments.push(format!("{name}{OPERATION_DISPLAY_SUFFIX}"));
                }
            }
        }
        write!(f, "{}", segments.iter().join(PATH_DISPLAY_SEPARATOR))
    }
}
