//! Executable mapping for one source/destination pair

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use error_stack::{Report, ResultExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::accessor::CompiledAccessor;
use crate::error::{Error, Result};
use crate::type_graph::ValueClass;

/// How a destination member was bound, as reported by [`CompiledMapping::plan`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum PlannedBinding {
    /// Read through a navigation path, rendered like `Son.Grandson.MyString`
    Path {
        /// Dotted rendering of the hops
        path:   String,
        /// Class of the value the path produces
        result: ValueClass,
    },
    /// Taken from an explicit accessor
    Override,
    /// Left at its default
    Ignored,
    /// No same-named source member while flattening was off
    Unmapped,
}

/// One row of a compiled mapping's plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberPlan {
    /// Destination member name
    pub member:  &'static str,
    /// Where its value comes from
    #[serde(flatten)]
    pub binding: PlannedBinding,
}

/// A destination member with its accessor and the value an absent path falls back to
pub(crate) struct CompiledMember<S> {
    pub(crate) member:   &'static str,
    pub(crate) accessor: Option<CompiledAccessor<S>>,
    pub(crate) default:  Value,
}

/// Compiled mapping from `S` to `D`; immutable once built
pub struct CompiledMapping<S, D> {
    members:  Vec<CompiledMember<S>>,
    defaults: Map<String, Value>,
    plan:     Vec<MemberPlan>,
    _types:   PhantomData<fn(&S) -> D>,
}

impl<S, D> CompiledMapping<S, D> {
    pub(crate) const fn new(
        members: Vec<CompiledMember<S>>,
        defaults: Map<String, Value>,
        plan: Vec<MemberPlan>,
    ) -> Self {
        Self {
            members,
            defaults,
            plan,
            _types: PhantomData,
        }
    }

    /// How every destination member is bound, in declaration order
    pub fn plan(&self) -> &[MemberPlan] {
        &self.plan
    }

    /// Accessor compiled for `member`; `None` for ignored, unmapped and unknown members
    pub fn accessor(&self, member: &str) -> Option<&CompiledAccessor<S>> {
        self.members
            .iter()
            .find(|compiled| compiled.member == member)
            .and_then(|compiled| compiled.accessor.as_ref())
    }
}

impl<S: Serialize, D: Serialize + DeserializeOwned> CompiledMapping<S, D> {
    /// Build a new `D` from `source`; unbound members keep `D::default()` values
    pub fn map(&self, source: &S) -> Result<D> {
        self.fill(source, self.defaults.clone())
    }

    /// Overwrite the bound members of `destination` from `source`.
    /// Ignored and unmapped members keep their current values.
    pub fn map_into(&self, source: &S, destination: &mut D) -> Result<()> {
        let current = match serde_json::to_value(&*destination) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(Report::new(Error::serialization_failed(
                    type_name::<D>(),
                    "destination did not serialize to an object",
                )));
            }
            Err(e) => {
                return Err(Report::new(Error::serialization_failed(type_name::<D>(), e)));
            }
        };
        *destination = self.fill(source, current)?;
        Ok(())
    }

    /// Map every element of `sources`, stopping at the first failure
    pub fn map_many(&self, sources: &[S]) -> Result<Vec<D>> {
        sources.iter().map(|source| self.map(source)).collect()
    }

    fn fill(&self, source: &S, mut fields: Map<String, Value>) -> Result<D> {
        let serialized = serde_json::to_value(source)
            .map_err(|e| Report::new(Error::serialization_failed(type_name::<S>(), e)))?;

        for compiled in &self.members {
            let Some(accessor) = &compiled.accessor else {
                continue;
            };
            let value = accessor
                .evaluate(source, &serialized)
                .attach(format!("member: {}", compiled.member))?;
            // Override results are taken as returned, null included.
            let value = match accessor {
                CompiledAccessor::Path { .. } if value.is_null() => compiled.default.clone(),
                _ => value,
            };
            fields.insert(compiled.member.to_string(), value);
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| Report::new(Error::deserialization_failed(type_name::<D>(), e)))
    }
}

impl<S, D> fmt::Debug for CompiledMapping<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMapping")
            .field("source", &type_name::<S>())
            .field("destination", &type_name::<D>())
            .field("plan", &self.plan)
            .finish()
    }
}
