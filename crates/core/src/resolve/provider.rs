// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider contract for discovery services and credential stores

use crate::params::{ConnectionParams, CredentialParams};
use thiserror::Error;

/// Errors from provider backends
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("provider backend error: {0}")]
    Backend(String),
}

impl ProviderError {
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Backend mapping a logical key to one or more parameter bags
pub trait Provider<P>: Send + Sync {
    /// Append `params` under `key`, returning what was registered
    fn register(&self, correlation_id: &str, key: &str, params: P) -> Result<P, ProviderError>;

    /// First bag registered under `key`
    fn resolve_one(&self, correlation_id: &str, key: &str) -> Result<Option<P>, ProviderError>;

    /// Every bag registered under `key`, in registration order
    fn resolve_all(&self, correlation_id: &str, key: &str) -> Result<Vec<P>, ProviderError>;
}

/// Discovery service resolving connection parameters
pub type Discovery = dyn Provider<ConnectionParams>;

/// Credential store resolving credential parameters
pub type CredentialStore = dyn Provider<CredentialParams>;
