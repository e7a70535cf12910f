//! Per type-pair mapping registrations
//!
//! A [`Registration`] records what the caller declared for one source/destination
//! pair: whether to flatten, explicit member overrides, and ignored members. It is
//! turned into a [`crate::CompiledMapping`] by the path compiler.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::type_graph::Describe;

/// Explicit source accessor installed for a destination member
pub type OverrideFn<S> = Arc<dyn Fn(&S) -> serde_json::Result<Value> + Send + Sync>;

/// Declared mapping from `S` to `D`
pub struct Registration<S, D> {
    flatten:   Option<bool>,
    overrides: Vec<(String, OverrideFn<S>)>,
    ignores:   Vec<String>,
    _types:    PhantomData<fn(&S) -> D>,
}

impl<S: Describe, D: Describe> Registration<S, D> {
    /// Start a registration with no overrides or ignores
    pub fn new() -> Self {
        Self {
            flatten:   None,
            overrides: Vec::new(),
            ignores:   Vec::new(),
            _types:    PhantomData,
        }
    }

    /// Resolve destination members through nested source members
    #[must_use]
    pub fn flatten_source(mut self) -> Self {
        self.flatten = Some(true);
        self
    }

    /// Only bind destination members to same-named source members
    #[must_use]
    pub fn no_flatten(mut self) -> Self {
        self.flatten = Some(false);
        self
    }

    /// Take `member` from `accessor` instead of resolving it by name.
    /// A later override of the same member replaces an earlier one.
    #[must_use]
    pub fn member<T, F>(mut self, member: impl Into<String>, accessor: F) -> Self
    where
        T: Serialize,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let member = member.into();
        let accessor: OverrideFn<S> =
            Arc::new(move |source: &S| serde_json::to_value(accessor(source)));
        self.overrides.retain(|(name, _)| *name != member);
        self.overrides.push((member, accessor));
        self
    }

    /// Leave `member` unassigned; wins over overrides and flattening
    #[must_use]
    pub fn ignore(mut self, member: impl Into<String>) -> Self {
        let member = member.into();
        if !self.ignores.contains(&member) {
            self.ignores.push(member);
        }
        self
    }

    /// Whether flattening applies, given the mapper-wide default
    pub fn flatten_enabled(&self, default: bool) -> bool {
        self.flatten.unwrap_or(default)
    }

    /// Explicit accessor for `member`, if one was declared
    pub fn override_for(&self, member: &str) -> Option<&OverrideFn<S>> {
        self.overrides
            .iter()
            .find(|(name, _)| name == member)
            .map(|(_, accessor)| accessor)
    }

    /// Whether `member` is ignored
    pub fn is_ignored(&self, member: &str) -> bool {
        self.ignores.iter().any(|name| name == member)
    }

    /// Every destination member name the registration refers to
    pub fn declared_members(&self) -> impl Iterator<Item = &str> {
        self.overrides
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(self.ignores.iter().map(String::as_str))
    }
}

impl<S: Describe, D: Describe> Default for Registration<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, D> Clone for Registration<S, D> {
    fn clone(&self) -> Self {
        Self {
            flatten:   self.flatten,
            overrides: self.overrides.clone(),
            ignores:   self.ignores.clone(),
            _types:    PhantomData,
        }
    }
}

impl<S: Describe, D: Describe> fmt::Debug for Registration<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides: Vec<&str> = self.overrides.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("Registration")
            .field("source", &S::type_name())
            .field("destination", &D::type_name())
            .field("flatten", &self.flatten)
            .field("overrides", &overrides)
            .field("ignores", &self.ignores)
            .finish()
    }
}
