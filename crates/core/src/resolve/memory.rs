// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory provider for tests and static configuration

use super::{Provider, ProviderError};
use crate::params::{ConnectionParams, CredentialParams, ParameterBag, ResolvedParams};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Provider backed by a map of key to registered bags
///
/// Registration appends without deduplication; `resolve_one` returns the
/// earliest registration for a key.
pub struct MemoryProvider<P> {
    items: Mutex<HashMap<String, Vec<P>>>,
}

/// In-memory discovery service
pub type MemoryDiscovery = MemoryProvider<ConnectionParams>;

/// In-memory credential store
pub type MemoryCredentialStore = MemoryProvider<CredentialParams>;

impl<P> Default for MemoryProvider<P> {
    fn default() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }
}

impl<P> MemoryProvider<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with at least one registration
    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    fn lock_items(&self) -> MutexGuard<'_, HashMap<String, Vec<P>>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P: ResolvedParams> MemoryProvider<P> {
    /// Build a provider from configuration
    ///
    /// Each subsection becomes a bag under its section name
    /// (`db.host=...` registers under `db`), and each plain key is parsed as
    /// a `key=value;...` string (`db=host=...;port=...`).
    pub fn from_params(config: &ParameterBag) -> Self {
        let provider = Self::new();
        provider.read_params(config);
        provider
    }

    /// Replace every registration with entries read from configuration
    pub fn read_params(&self, config: &ParameterBag) {
        let mut items: HashMap<String, Vec<P>> = HashMap::new();

        for (key, value) in config.iter().filter(|(key, _)| !key.contains('.')) {
            let params = P::from(value.parse::<ParameterBag>().unwrap_or_default());
            items.entry(key.to_string()).or_default().push(params);
        }
        for name in config.section_names() {
            let params = P::from(config.get_section(&name));
            items.entry(name).or_default().push(params);
        }

        tracing::debug!(keys = items.len(), "memory provider configured");
        *self.lock_items() = items;
    }
}

impl<P: Clone + Send> Provider<P> for MemoryProvider<P> {
    fn register(&self, correlation_id: &str, key: &str, params: P) -> Result<P, ProviderError> {
        self.lock_items()
            .entry(key.to_string())
            .or_default()
            .push(params.clone());
        tracing::debug!(correlation_id, key, "registered in memory provider");
        Ok(params)
    }

    fn resolve_one(&self, _correlation_id: &str, key: &str) -> Result<Option<P>, ProviderError> {
        Ok(self
            .lock_items()
            .get(key)
            .and_then(|bags| bags.first().cloned()))
    }

    fn resolve_all(&self, _correlation_id: &str, key: &str) -> Result<Vec<P>, ProviderError> {
        Ok(self.lock_items().get(key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
