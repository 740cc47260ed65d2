// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolver over statically configured and provider-backed bags

use super::{Descriptor, Provider, References, ResolveError};
use crate::params::{ConnectionParams, CredentialParams, ParameterBag, ResolvedParams};
use std::sync::Arc;

/// Resolves connection parameters, directly or through discovery services
pub type ConnectionResolver = Resolver<ConnectionParams>;

/// Resolves credential parameters, directly or through credential stores
pub type CredentialResolver = Resolver<CredentialParams>;

/// Holds configured parameter bags and resolves them to usable values
///
/// A bag is *direct* when its indirection key is missing or empty, and is
/// then returned as-is. An *indirect* bag names a key to look up in every
/// provider attached through [`References`] under the provider descriptor.
#[derive(Clone, Debug)]
pub struct Resolver<P: ResolvedParams> {
    items: Vec<P>,
    references: Option<References>,
    provider_descriptor: Descriptor,
}

impl<P: ResolvedParams> Default for Resolver<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ResolvedParams> Resolver<P> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            references: None,
            provider_descriptor: P::provider_descriptor(),
        }
    }

    /// Build a resolver from configuration and optional provider references
    pub fn from_config(config: &ParameterBag, references: Option<References>) -> Self {
        let mut resolver = Self::new();
        resolver.configure(config);
        resolver.references = references;
        resolver
    }

    /// Match providers with `descriptor` instead of the default locator
    pub fn with_provider_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.provider_descriptor = descriptor;
        self
    }

    /// Append every bag found in configuration
    pub fn configure(&mut self, config: &ParameterBag) {
        self.items.extend(P::many_from_config(config));
    }

    pub fn set_references(&mut self, references: References) {
        self.references = Some(references);
    }

    pub fn provider_descriptor(&self) -> &Descriptor {
        &self.provider_descriptor
    }

    /// Configured bags in insertion order
    pub fn get_all(&self) -> &[P] {
        &self.items
    }

    pub fn add(&mut self, params: P) {
        self.items.push(params);
    }

    /// Resolve a single usable bag
    ///
    /// The first direct bag wins. Otherwise each indirect bag is looked up in
    /// every provider, in order, until one returns a value.
    pub fn resolve(&self, correlation_id: &str) -> Result<Option<P>, ResolveError> {
        if let Some(direct) = self.items.iter().find(|params| !params.is_indirect()) {
            return Ok(Some(direct.clone()));
        }

        for params in &self.items {
            let Some(key) = params.indirection_key() else {
                continue;
            };
            if let Some(found) = self.resolve_one_in(correlation_id, key)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Resolve every usable bag
    ///
    /// Direct bags come first in insertion order, followed by the provider
    /// results for each indirect bag.
    pub fn resolve_all(&self, correlation_id: &str) -> Result<Vec<P>, ResolveError> {
        let mut resolved: Vec<P> = self
            .items
            .iter()
            .filter(|params| !params.is_indirect())
            .cloned()
            .collect();

        for params in &self.items {
            let Some(key) = params.indirection_key() else {
                continue;
            };
            resolved.extend(self.resolve_all_in(correlation_id, key)?);
        }
        Ok(resolved)
    }

    /// Register an indirect bag with every provider and keep it locally
    ///
    /// Returns `Ok(false)` without side effects for a direct bag. A provider
    /// failure aborts the call and leaves the local list unchanged.
    pub fn register(&mut self, correlation_id: &str, params: P) -> Result<bool, ResolveError> {
        let Some(key) = params.indirection_key() else {
            return Ok(false);
        };

        for provider in self.providers()? {
            provider
                .register(correlation_id, key, params.clone())
                .inspect_err(|error| {
                    tracing::warn!(correlation_id, key, %error, "provider registration failed");
                })?;
        }

        tracing::debug!(correlation_id, key, "registered indirect parameters");
        self.items.push(params);
        Ok(true)
    }

    fn resolve_one_in(&self, correlation_id: &str, key: &str) -> Result<Option<P>, ResolveError> {
        for provider in self.providers()? {
            let found = provider.resolve_one(correlation_id, key).inspect_err(|error| {
                tracing::warn!(correlation_id, key, %error, "provider lookup failed");
            })?;
            if found.is_some() {
                tracing::debug!(correlation_id, key, "resolved through provider");
                return Ok(found);
            }
        }
        Ok(None)
    }

    fn resolve_all_in(&self, correlation_id: &str, key: &str) -> Result<Vec<P>, ResolveError> {
        let mut found = Vec::new();
        for provider in self.providers()? {
            let bags = provider.resolve_all(correlation_id, key).inspect_err(|error| {
                tracing::warn!(correlation_id, key, %error, "provider lookup failed");
            })?;
            found.extend(bags);
        }
        tracing::debug!(correlation_id, key, count = found.len(), "resolved through providers");
        Ok(found)
    }

    /// Providers matching the descriptor, or an error when none is attached
    fn providers(&self) -> Result<Vec<Arc<dyn Provider<P>>>, ResolveError> {
        let providers = self
            .references
            .as_ref()
            .map(|references| {
                references.get_optional::<Arc<dyn Provider<P>>>(&self.provider_descriptor)
            })
            .unwrap_or_default();

        if providers.is_empty() {
            return Err(ResolveError::MissingProvider {
                descriptor: self.provider_descriptor.clone(),
            });
        }
        Ok(providers)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
