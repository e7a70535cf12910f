//! Mapping registry
//!
//! Owns the configuration, the descriptor cache, the registrations, and the compiled
//! mappings. Registrations take effect only after [`Mapper::compile`]; compilation
//! is all-or-nothing so a failed compile leaves the previously compiled set intact.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use error_stack::{Report, ResultExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::compiler::{CompiledMapping, PathCompiler};
use crate::config::MapperConfig;
use crate::error::{Error, Result};
use crate::registration::Registration;
use crate::type_graph::{Describe, TypeDescriptor, TypeInspector};

/// Identity of a source/destination pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MappingKey {
    source:      TypeId,
    destination: TypeId,
}

impl MappingKey {
    fn of<S: 'static, D: 'static>() -> Self {
        Self {
            source:      TypeId::of::<S>(),
            destination: TypeId::of::<D>(),
        }
    }
}

type ErasedMapping = Box<dyn Any + Send + Sync>;

/// A registration with its type pair erased so the registry can hold many
trait ErasedRegistration: Send + Sync {
    fn key(&self) -> MappingKey;

    fn type_names(&self) -> (&'static str, &'static str);

    fn compile(&self, compiler: PathCompiler<'_>) -> Result<ErasedMapping>;
}

impl<S, D> ErasedRegistration for Registration<S, D>
where
    S: Describe + Serialize,
    D: Describe + Serialize + DeserializeOwned + Default,
{
    fn key(&self) -> MappingKey {
        MappingKey::of::<S, D>()
    }

    fn type_names(&self) -> (&'static str, &'static str) {
        (S::type_name(), D::type_name())
    }

    fn compile(&self, compiler: PathCompiler<'_>) -> Result<ErasedMapping> {
        let mapping = compiler.compile(self)?;
        Ok(Box::new(mapping))
    }
}

/// Registry of mappings between describable types
#[derive(Default)]
pub struct Mapper {
    config:        MapperConfig,
    inspector:     TypeInspector,
    registrations: Vec<Box<dyn ErasedRegistration>>,
    compiled:      HashMap<MappingKey, ErasedMapping>,
}

impl Mapper {
    /// Create a mapper with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with `config`
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Add a registration; one for the same type pair is replaced
    pub fn register<S, D>(&mut self, registration: Registration<S, D>) -> &mut Self
    where
        S: Describe + Serialize,
        D: Describe + Serialize + DeserializeOwned + Default,
    {
        let key = MappingKey::of::<S, D>();
        if let Some(existing) = self.registrations.iter_mut().find(|r| r.key() == key) {
            warn!(
                source = S::type_name(),
                destination = D::type_name(),
                "Replacing existing registration"
            );
            *existing = Box::new(registration);
        } else {
            self.registrations.push(Box::new(registration));
        }
        self
    }

    /// Number of registrations, compiled or not
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// Compile every registration. On failure nothing is replaced.
    pub fn compile(&mut self) -> Result<()> {
        let compiler = PathCompiler::new(&self.inspector, &self.config);
        let mut compiled = HashMap::with_capacity(self.registrations.len());
        for registration in &self.registrations {
            let (source, destination) = registration.type_names();
            let mapping = registration
                .compile(compiler)
                .attach(format!("while compiling {source} -> {destination}"))?;
            compiled.insert(registration.key(), mapping);
        }

        info!(
            mappings = compiled.len(),
            descriptors = self.inspector.len(),
            naming = %self.config.naming,
            "Compiled mapper"
        );
        self.compiled = compiled;
        Ok(())
    }

    /// Whether a compiled mapping from `S` to `D` exists
    pub fn is_compiled<S: 'static, D: 'static>(&self) -> bool {
        self.compiled.contains_key(&MappingKey::of::<S, D>())
    }

    /// Compiled mapping from `S` to `D`
    pub fn mapping<S: 'static, D: 'static>(&self) -> Result<&CompiledMapping<S, D>> {
        self.compiled
            .get(&MappingKey::of::<S, D>())
            .and_then(|mapping| mapping.downcast_ref::<CompiledMapping<S, D>>())
            .ok_or_else(|| {
                Report::new(Error::NotCompiled {
                    source_type:      type_name::<S>().to_string(),
                    destination_type: type_name::<D>().to_string(),
                })
            })
    }

    /// Map `source` to a new `D`
    pub fn map<S, D>(&self, source: &S) -> Result<D>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + 'static,
    {
        self.mapping::<S, D>()?.map(source)
    }

    /// Map `source` onto an existing `destination`
    pub fn map_into<S, D>(&self, source: &S, destination: &mut D) -> Result<()>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + 'static,
    {
        self.mapping::<S, D>()?.map_into(source, destination)
    }

    /// Map every element of `sources`
    pub fn map_many<S, D>(&self, sources: &[S]) -> Result<Vec<D>>
    where
        S: Serialize + 'static,
        D: Serialize + DeserializeOwned + 'static,
    {
        self.mapping::<S, D>()?.map_many(sources)
    }

    /// Descriptor of `T` from the shared cache
    pub fn describe<T: Describe>(&self) -> Arc<TypeDescriptor> {
        self.inspector.describe_type::<T>()
    }

    /// Drop registrations, compiled mappings and cached descriptors
    pub fn reset(&mut self) {
        self.registrations.clear();
        self.compiled.clear();
        self.inspector.clear();
        info!("Mapper reset");
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registrations: Vec<_> = self
            .registrations
            .iter()
            .map(|registration| registration.type_names())
            .collect();
        f.debug_struct("Mapper")
            .field("config", &self.config)
            .field("registrations", &registrations)
            .field("compiled", &self.compiled.len())
            .field("descriptors", &self.inspector.len())
            .finish()
    }
}
