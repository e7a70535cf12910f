//! Structural compatibility between a produced value and a destination type
//!
//! Values travel through their serialized form, so a source type fits a destination
//! type when every destination member can be read back from what the source writes:
//! scalars by [`ValueClass`] assignability, collections element by element, structs
//! member by member under the same serialized name. Top-level absence is not checked
//! here; compiled mappings substitute defaults for it.

use std::any::TypeId;
use std::collections::HashSet;

use super::describe::{Shape, TypeRef};
use super::descriptor::{Unwrapped, ValueClass};

/// Compatibility checker; remembers struct pairs already assumed compatible
#[derive(Debug, Default)]
pub struct Compatibility {
    assumed: HashSet<(TypeId, TypeId)>,
}

impl Compatibility {
    /// Create a checker with no assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a value of `source` can populate a member declared as `destination`
    pub fn fits(&mut self, source: TypeRef, destination: TypeRef) -> bool {
        self.fits_unwrapped(&Unwrapped::of(source), &Unwrapped::of(destination))
    }

    /// Whether a path producing `source` through `iterations` collection layers can
    /// populate a member declared as `destination`
    pub fn fits_path(&mut self, source: TypeRef, iterations: usize, destination: TypeRef) -> bool {
        let mut destination = Unwrapped::of(destination);
        for _ in 0..iterations {
            destination = match destination.shape {
                Shape::Opaque => return true,
                Shape::Collection(element) => Unwrapped::of(element),
                _ => return false,
            };
        }
        self.fits_unwrapped(&Unwrapped::of(source), &destination)
    }

    fn fits_unwrapped(&mut self, source: &Unwrapped, destination: &Unwrapped) -> bool {
        match (&source.shape, &destination.shape) {
            (_, Shape::Opaque) => true,
            (Shape::Scalar(source_kind), Shape::Scalar(destination_kind)) => {
                ValueClass::from(*source_kind).assignable_to(ValueClass::from(*destination_kind))
            }
            (Shape::Collection(source_element), Shape::Collection(destination_element)) => {
                self.fits_nested(*source_element, *destination_element)
            }
            (Shape::Complex(source_members), Shape::Complex(destination_members)) => {
                if source.ty == destination.ty
                    || !self.assumed.insert((source.ty.id(), destination.ty.id()))
                {
                    return true;
                }
                destination_members.iter().all(|wanted| {
                    source_members
                        .iter()
                        .find(|offered| offered.name == wanted.name)
                        .map_or_else(
                            || Unwrapped::of(wanted.ty).nullable,
                            |offered| self.fits_nested(offered.ty, wanted.ty),
                        )
                })
            }
            _ => false,
        }
    }

    /// Inside collections and structs nothing substitutes a default, so an optional
    /// source needs an optional (or opaque) destination.
    fn fits_nested(&mut self, source: TypeRef, destination: TypeRef) -> bool {
        let source = Unwrapped::of(source);
        let destination = Unwrapped::of(destination);
        (!source.nullable || destination.nullable || matches!(destination.shape, Shape::Opaque))
            && self.fits_unwrapped(&source, &destination)
    }
}
