// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed registry of components located by descriptor

use super::{Descriptor, Provider};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Reference {
    descriptor: Descriptor,
    component: Arc<dyn Any + Send + Sync>,
}

/// Components registered under descriptors
///
/// Lookups are typed: `get_optional::<T>` returns the components that match
/// the locator *and* were registered as a `T`, skipping everything else.
/// Providers are registered as `Arc<dyn Provider<P>>`.
#[derive(Clone, Default)]
pub struct References {
    entries: Vec<Reference>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under `descriptor`
    pub fn put<T: Any + Send + Sync>(&mut self, descriptor: Descriptor, component: T) {
        self.entries.push(Reference {
            descriptor,
            component: Arc::new(component),
        });
    }

    /// Register a provider so resolvers for `P` can find it
    pub fn put_provider<P: 'static>(
        &mut self,
        descriptor: Descriptor,
        provider: Arc<dyn Provider<P>>,
    ) {
        self.put(descriptor, provider);
    }

    /// Every component of type `T` whose descriptor matches `locator`
    pub fn get_optional<T: Any + Clone>(&self, locator: &Descriptor) -> Vec<T> {
        self.entries
            .iter()
            .filter(|entry| locator.matches(&entry.descriptor))
            .filter_map(|entry| entry.component.downcast_ref::<T>().cloned())
            .collect()
    }

    /// Remove every component matching `locator`, returning how many were removed
    pub fn remove_all(&mut self, locator: &Descriptor) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !locator.matches(&entry.descriptor));
        before - self.entries.len()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for References {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptors()).finish()
    }
}

#[cfg(test)]
#[path = "references_tests.rs"]
mod tests;
