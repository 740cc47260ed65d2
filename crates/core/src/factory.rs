// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Descriptor-keyed constructor registries
//!
//! A [`Factory`] maps descriptors to zero-argument constructors and builds
//! the first one whose descriptor matches a locator. The `default_*`
//! functions return factories pre-loaded with the in-memory and null
//! components under the `wharf` group.

use crate::cache::{Cache, MemoryCache, NullCache};
use crate::lock::{Lock, MemoryLock, NullLock};
use crate::params::{ConnectionParams, CredentialParams};
use crate::resolve::{Descriptor, MemoryCredentialStore, MemoryDiscovery, Provider};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub const GROUP: &str = "wharf";
pub const VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("no constructor registered for {descriptor}")]
    NotRegistered { descriptor: Descriptor },
}

type Constructor<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Registry of constructors producing `T`
pub struct Factory<T> {
    registrations: Vec<(Descriptor, Constructor<T>)>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }
}

impl<T> Factory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `constructor` under `descriptor`; earlier registrations win on lookup
    pub fn register<F>(&mut self, descriptor: Descriptor, constructor: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.registrations.push((descriptor, Box::new(constructor)));
    }

    /// Descriptor of the constructor `create` would use for `locator`
    pub fn can_create(&self, locator: &Descriptor) -> Option<&Descriptor> {
        self.find(locator).map(|(descriptor, _)| descriptor)
    }

    pub fn create(&self, locator: &Descriptor) -> Result<T, FactoryError> {
        let (descriptor, constructor) =
            self.find(locator).ok_or_else(|| FactoryError::NotRegistered {
                descriptor: locator.clone(),
            })?;
        tracing::debug!(%descriptor, "creating component");
        Ok(constructor())
    }

    fn find(&self, locator: &Descriptor) -> Option<&(Descriptor, Constructor<T>)> {
        self.registrations
            .iter()
            .find(|(descriptor, _)| locator.matches(descriptor))
    }
}

impl<T> fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|(descriptor, _)| descriptor))
            .finish()
    }
}

fn descriptor(capability: &str, kind: &str) -> Descriptor {
    Descriptor::new(GROUP, capability, kind, "default", VERSION)
}

/// Caches: `wharf:cache:memory:default:1.0`, `wharf:cache:null:default:1.0`
pub fn default_cache_factory() -> Factory<Arc<dyn Cache>> {
    let mut factory: Factory<Arc<dyn Cache>> = Factory::new();
    factory.register(descriptor("cache", "memory"), || Arc::new(MemoryCache::new()));
    factory.register(descriptor("cache", "null"), || Arc::new(NullCache::new()));
    factory
}

/// Locks: `wharf:lock:memory:default:1.0`, `wharf:lock:null:default:1.0`
pub fn default_lock_factory() -> Factory<Arc<dyn Lock>> {
    let mut factory: Factory<Arc<dyn Lock>> = Factory::new();
    factory.register(descriptor("lock", "memory"), || Arc::new(MemoryLock::new()));
    factory.register(descriptor("lock", "null"), || Arc::new(NullLock::new()));
    factory
}

/// Discovery: `wharf:discovery:memory:default:1.0`
pub fn default_discovery_factory() -> Factory<Arc<dyn Provider<ConnectionParams>>> {
    let mut factory: Factory<Arc<dyn Provider<ConnectionParams>>> = Factory::new();
    factory.register(descriptor("discovery", "memory"), || {
        Arc::new(MemoryDiscovery::new())
    });
    factory
}

/// Credential stores: `wharf:credential-store:memory:default:1.0`
pub fn default_credential_store_factory() -> Factory<Arc<dyn Provider<CredentialParams>>> {
    let mut factory: Factory<Arc<dyn Provider<CredentialParams>>> = Factory::new();
    factory.register(descriptor("credential-store", "memory"), || {
        Arc::new(MemoryCredentialStore::new())
    });
    factory
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
