//! Path compiler
//!
//! Turns a [`Registration`] into a [`CompiledMapping`]: merges the declared bindings
//! with convention resolution, captures per-member defaults from `D::default()`, and
//! fails on the first destination member that has no usable source.

use std::any::type_name;

use error_stack::Report;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::accessor::{AbsentElement, CompiledAccessor};
use super::compiled_mapping::{CompiledMapping, CompiledMember, MemberPlan, PlannedBinding};
use crate::binding::{Binding, BindingMerger};
use crate::config::MapperConfig;
use crate::error::{Error, Result};
use crate::flatten::PathResolver;
use crate::registration::Registration;
use crate::type_graph::{Describe, TypeDescriptor, TypeInspector};

/// Compiles registrations against a shared descriptor cache
#[derive(Debug, Clone, Copy)]
pub struct PathCompiler<'a> {
    inspector: &'a TypeInspector,
    config:    &'a MapperConfig,
}

impl<'a> PathCompiler<'a> {
    /// Create a compiler using `inspector` for type descriptors
    pub const fn new(inspector: &'a TypeInspector, config: &'a MapperConfig) -> Self {
        Self { inspector, config }
    }

    /// Compile `registration` into an executable mapping
    pub fn compile<S, D>(&self, registration: &Registration<S, D>) -> Result<CompiledMapping<S, D>>
    where
        S: Describe + Serialize,
        D: Describe + Serialize + DeserializeOwned + Default,
    {
        let source = self.inspector.describe_type::<S>();
        let destination = self.inspector.describe_type::<D>();
        require_complex(&source)?;
        require_complex(&destination)?;

        let defaults = match serde_json::to_value(D::default()) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(Report::new(Error::serialization_failed(
                    type_name::<D>(),
                    "default value did not serialize to an object",
                )));
            }
            Err(e) => {
                return Err(Report::new(Error::serialization_failed(type_name::<D>(), e)));
            }
        };

        let flatten = registration.flatten_enabled(self.config.flatten_by_default);
        let resolver = PathResolver::new(self.inspector, self.config.naming);
        let bindings = BindingMerger::new(resolver).merge(registration, &destination, flatten)?;

        let mut members = Vec::with_capacity(bindings.len());
        let mut plan = Vec::with_capacity(bindings.len());
        for bound in bindings {
            let (accessor, planned) = match bound.binding {
                Binding::Resolved(path) => {
                    let planned = PlannedBinding::Path {
                        path:   path.to_string(),
                        result: path.result(),
                    };
                    let absent = destination.member(bound.member).map_or(
                        AbsentElement::Fill(Value::Null),
                        |member| AbsentElement::for_path(&path, member.declared),
                    );
                    (Some(CompiledAccessor::Path { path, absent }), planned)
                }
                Binding::Override(accessor) => {
                    (Some(CompiledAccessor::Override(accessor)), PlannedBinding::Override)
                }
                Binding::Ignore => (None, PlannedBinding::Ignored),
                Binding::Unmapped => (None, PlannedBinding::Unmapped),
                Binding::Unresolved(stall) => {
                    debug!(
                        member = bound.member,
                        residual = %stall.residual,
                        type_name = stall.type_name,
                        "Destination member has no source path"
                    );
                    return Err(Report::new(Error::unresolved(
                        stall.residual,
                        bound.member,
                        stall.type_name,
                    )));
                }
            };

            members.push(CompiledMember {
                member: bound.member,
                accessor,
                default: defaults.get(bound.member).cloned().unwrap_or(Value::Null),
            });
            plan.push(MemberPlan {
                member:  bound.member,
                binding: planned,
            });
        }

        debug!(
            source = source.name(),
            destination = destination.name(),
            members = members.len(),
            flatten,
            "Compiled mapping"
        );
        Ok(CompiledMapping::new(members, defaults, plan))
    }
}

fn require_complex(descriptor: &TypeDescriptor) -> Result<()> {
    if descriptor.is_complex() {
        Ok(())
    } else {
        Err(Report::new(Error::NotComplex {
            type_name: descriptor.name().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::panic,
        reason = "tests fail loudly on unexpected results"
    )]

    use serde::Deserialize;

    use super::*;
    use crate::config::NamingConvention;
    use crate::type_graph::{MemberDef, Shape, TypeRef};

    #[derive(Serialize, Default)]
    struct Son {
        #[serde(rename = "MyString")]
        my_string: Option<String>,
    }

    impl Describe for Son {
        fn shape() -> Shape {
            Shape::Complex(vec![MemberDef::new(
                "MyString",
                TypeRef::of::<Option<String>>(),
            )])
        }
    }

    #[derive(Serialize, Default)]
    struct Father {
        #[serde(rename = "MyString")]
        my_string: Option<String>,
        #[serde(rename = "Son")]
        son:       Option<Son>,
        #[serde(rename = "Sons")]
        sons:      Vec<Son>,
    }

    impl Describe for Father {
        fn shape() -> Shape {
            Shape::Complex(vec![
                MemberDef::new("MyString", TypeRef::of::<Option<String>>()),
                MemberDef::new("Son", TypeRef::of::<Option<Son>>()),
                MemberDef::new("Sons", TypeRef::of::<Vec<Son>>()),
            ])
        }
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct FatherDto {
        #[serde(rename = "MyString")]
        my_string:     String,
        #[serde(rename = "SonMyString")]
        son_my_string: String,
        #[serde(rename = "SonsCount")]
        sons_count:    i32,
    }

    impl Default for FatherDto {
        fn default() -> Self {
            Self {
                my_string:     "unset".to_string(),
                son_my_string: "no son".to_string(),
                sons_count:    -1,
            }
        }
    }

    impl Describe for FatherDto {
        fn shape() -> Shape {
            Shape::Complex(vec![
                MemberDef::new("MyString", TypeRef::of::<String>()),
                MemberDef::new("SonMyString", TypeRef::of::<String>()),
                MemberDef::new("SonsCount", TypeRef::of::<i32>()),
            ])
        }
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq, Default)]
    struct MissingDto {
        #[serde(rename = "SonNickname")]
        son_nickname: String,
    }

    impl Describe for MissingDto {
        fn shape() -> Shape {
            Shape::Complex(vec![MemberDef::new("SonNickname", TypeRef::of::<String>())])
        }
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct LabelledDto {
        #[serde(rename = "MyString")]
        my_string:     Option<String>,
        #[serde(rename = "SonMyString")]
        son_my_string: Option<String>,
    }

    impl Default for LabelledDto {
        fn default() -> Self {
            Self {
                my_string:     Some("unset".to_string()),
                son_my_string: Some("no son".to_string()),
            }
        }
    }

    impl Describe for LabelledDto {
        fn shape() -> Shape {
            Shape::Complex(vec![
                MemberDef::new("MyString", TypeRef::of::<Option<String>>()),
                MemberDef::new("SonMyString", TypeRef::of::<Option<String>>()),
            ])
        }
    }

    fn config() -> MapperConfig {
        MapperConfig::default()
            .with_naming(NamingConvention::PascalCase)
            .with_flatten_by_default(true)
    }

    #[test]
    fn test_compiles_plan_in_destination_order() {
        let inspector = TypeInspector::new();
        let config = config();
        let mapping = PathCompiler::new(&inspector, &config)
            .compile(&Registration::<Father, FatherDto>::new())
            .expect("compile");

        let paths: Vec<_> = mapping
            .plan()
            .iter()
            .map(|row| match &row.binding {
                PlannedBinding::Path { path, .. } => path.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(paths, ["MyString", "Son.MyString", "Sons.Count()"]);
    }

    #[test]
    fn test_absent_values_fall_back_to_defaults() {
        let inspector = TypeInspector::new();
        let config = config();
        let mapping = PathCompiler::new(&inspector, &config)
            .compile(&Registration::<Father, FatherDto>::new())
            .expect("compile");

        let dto = mapping.map(&Father::default()).expect("map");
        assert_eq!(
            dto,
            FatherDto {
                my_string:     "unset".to_string(),
                son_my_string: "no son".to_string(),
                sons_count:    0,
            }
        );
    }

    #[test]
    fn test_override_result_is_not_replaced_by_default() {
        let inspector = TypeInspector::new();
        let config = config();
        let registration = Registration::<Father, LabelledDto>::new()
            .member("MyString", |_: &Father| Option::<String>::None);
        let mapping = PathCompiler::new(&inspector, &config)
            .compile(&registration)
            .expect("compile");

        let dto = mapping.map(&Father::default()).expect("map");
        assert_eq!(
            dto,
            LabelledDto {
                my_string:     None,
                son_my_string: Some("no son".to_string()),
            }
        );
    }

    #[test]
    fn test_iterating_paths_carry_absent_element_treatment() {
        #[derive(Debug, Serialize, Deserialize, PartialEq, Default)]
        struct SonsDto {
            #[serde(rename = "SonsMyString")]
            sons_my_string: Vec<String>,
        }

        impl Describe for SonsDto {
            fn shape() -> Shape {
                Shape::Complex(vec![MemberDef::new(
                    "SonsMyString",
                    TypeRef::of::<Vec<String>>(),
                )])
            }
        }

        let inspector = TypeInspector::new();
        let config = config();
        let mapping = PathCompiler::new(&inspector, &config)
            .compile(&Registration::<Father, SonsDto>::new())
            .expect("compile");
        let Some(CompiledAccessor::Path { absent, .. }) = mapping.accessor("SonsMyString") else {
            panic!("SonsMyString should compile to a path");
        };
        assert_eq!(*absent, AbsentElement::Fill(Value::from("")));

        let father = Father {
            sons: vec![
                Son {
                    my_string: Some("A".to_string()),
                },
                Son { my_string: None },
            ],
            ..Father::default()
        };
        let dto = mapping.map(&father).expect("map");
        assert_eq!(dto.sons_my_string, ["A", ""]);
    }

    #[test]
    fn test_unresolved_member_fails_compilation() {
        let inspector = TypeInspector::new();
        let config = config();
        let report = PathCompiler::new(&inspector, &config)
            .compile(&Registration::<Father, MissingDto>::new())
            .expect_err("SonNickname has no source");
        assert_eq!(
            report.current_context().to_string(),
            format!(
                "We could not find the Method Nickname() which matched the property SonNickname of type {}.",
                Son::type_name()
            )
        );
    }

    #[test]
    fn test_scalar_types_cannot_be_mapped() {
        #[derive(Serialize, Deserialize, Default)]
        struct Wrapper;

        impl Describe for Wrapper {
            fn shape() -> Shape {
                Shape::Opaque
            }
        }

        let inspector = TypeInspector::new();
        let config = config();
        let report = PathCompiler::new(&inspector, &config)
            .compile(&Registration::<Father, Wrapper>::new())
            .expect_err("opaque destination");
        assert!(matches!(report.current_context(), Error::NotComplex { .. }));
    }
}
