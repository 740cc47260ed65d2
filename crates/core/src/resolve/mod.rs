// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of connection and credential parameters
//!
//! This module provides:
//! - **Descriptor** - `group:capability:kind:name:version` component locator
//! - **References** - Typed registry the resolver finds providers in
//! - **Provider** - Discovery/credential-store contract, with an in-memory backend
//! - **Resolver** - Direct bags first, indirect bags through providers

mod descriptor;
mod memory;
mod provider;
mod references;
mod resolver;

pub use descriptor::{Descriptor, DescriptorError};
pub use memory::{MemoryCredentialStore, MemoryDiscovery, MemoryProvider};
pub use provider::{CredentialStore, Discovery, Provider, ProviderError};
pub use references::References;
pub use resolver::{ConnectionResolver, CredentialResolver, Resolver};

use thiserror::Error;

/// Errors from resolving or registering parameters
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Indirection was required but no provider matched the descriptor
    #[error("no provider found for {descriptor}")]
    MissingProvider { descriptor: Descriptor },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
