//! Compiled accessors
//!
//! Accessors evaluate over the serialized form of a source instance. Every member
//! read is null-safe: an absent object ends the walk with `null`, which the mapping
//! replaces by the destination member's default; an absent collection under an
//! aggregate yields the aggregate's neutral value.
//!
//! Under per-element traversal an absent intermediate object makes that element
//! absent. Such elements are replaced by the destination element's neutral value
//! (`null` for optional elements, zero, `false`, empty text or collection) or, when
//! the element type has none, dropped from the result.

use std::fmt;

use error_stack::Report;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::flatten::{Hop, NavigationPath};
use crate::registration::OverrideFn;
use crate::type_graph::{ScalarKind, Shape, TypeRef, Unwrapped};

/// Treatment of an element made absent by a missing intermediate object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentElement {
    /// Replace the element with this value
    Fill(Value),
    /// Remove the element
    Drop,
}

impl AbsentElement {
    /// Treatment for elements that populate `element`, a destination element type
    pub fn for_element(element: TypeRef) -> Self {
        let unwrapped = Unwrapped::of(element);
        if unwrapped.nullable {
            return Self::Fill(Value::Null);
        }
        match unwrapped.shape {
            Shape::Scalar(ScalarKind::Bool) => Self::Fill(Value::Bool(false)),
            Shape::Scalar(ScalarKind::Integer) => Self::Fill(Value::from(0)),
            Shape::Scalar(ScalarKind::Float) => Self::Fill(Value::from(0.0)),
            Shape::Scalar(ScalarKind::Text) if unwrapped.ty == TypeRef::of::<char>() => {
                Self::Fill(Value::from("\0"))
            }
            Shape::Scalar(ScalarKind::Text) => Self::Fill(Value::from("")),
            Shape::Collection(_) => Self::Fill(Value::Array(Vec::new())),
            Shape::Opaque | Shape::Complex(_) | Shape::Transparent { .. } => Self::Drop,
        }
    }

    /// Treatment for a path feeding a member declared as `declared`
    pub fn for_path(path: &NavigationPath, declared: TypeRef) -> Self {
        let mut element = declared;
        for _ in 0..path.iterations() {
            match Unwrapped::of(element).shape {
                Shape::Collection(inner) => element = inner,
                _ => return Self::Fill(Value::Null),
            }
        }
        Self::for_element(element)
    }
}

/// Source of a destination member's value, ready to run
pub enum CompiledAccessor<S> {
    /// Walk a navigation path
    Path {
        /// Route over the serialized source
        path:   NavigationPath,
        /// Treatment of absent elements when the path iterates
        absent: AbsentElement,
    },
    /// Call an explicit accessor
    Override(OverrideFn<S>),
}

impl<S: Serialize> CompiledAccessor<S> {
    /// Read the value for `source`
    pub fn get(&self, source: &S) -> Result<Value> {
        let serialized = serde_json::to_value(source)
            .map_err(|e| Report::new(Error::serialization_failed("source", e)))?;
        self.evaluate(source, &serialized)
    }

    /// Read the value given `source` and its already serialized form
    pub(crate) fn evaluate(&self, source: &S, serialized: &Value) -> Result<Value> {
        match self {
            Self::Path { path, absent } => Ok(settle(
                walk(serialized, path.hops()),
                path.iterations(),
                absent,
            )),
            Self::Override(accessor) => accessor(source)
                .map_err(|e| Report::new(Error::serialization_failed("override result", e))),
        }
    }
}

impl<S> fmt::Debug for CompiledAccessor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { path, absent } => f
                .debug_struct("Path")
                .field("path", path)
                .field("absent", absent)
                .finish(),
            Self::Override(_) => f.write_str("Override(<fn>)"),
        }
    }
}

/// Evaluate `hops` against `value`
pub fn walk(value: &Value, hops: &[Hop]) -> Value {
    let Some((hop, rest)) = hops.split_first() else {
        return value.clone();
    };

    match hop {
        Hop::Member { name, .. } => {
            let child = value.get(*name).unwrap_or(&Value::Null);
            if child.is_null() && !rest.is_empty() {
                return match rest.first() {
                    Some(Hop::Aggregate { operation }) => operation.neutral(),
                    _ => Value::Null,
                };
            }
            walk(child, rest)
        }
        Hop::Iterate => match value {
            Value::Array(elements) => {
                Value::Array(elements.iter().map(|element| walk(element, rest)).collect())
            }
            _ => Value::Null,
        },
        Hop::Aggregate { operation } => match value {
            Value::Array(elements) => operation.apply(elements),
            _ => operation.neutral(),
        },
    }
}

/// Resolve absent elements in the result of a path iterating `depth` times
fn settle(value: Value, depth: usize, absent: &AbsentElement) -> Value {
    if depth == 0 {
        return value;
    }
    let Value::Array(elements) = value else {
        return value;
    };

    let settled = elements
        .into_iter()
        .filter_map(|element| match (element, depth) {
            (Value::Null, 1) => match absent {
                AbsentElement::Fill(fill) => Some(fill.clone()),
                AbsentElement::Drop => None,
            },
            (Value::Null, _) => Some(Value::Array(Vec::new())),
            (element, 1) => Some(element),
            (element, _) => Some(settle(element, depth - 1, absent)),
        })
        .collect();
    Value::Array(settled)
}
