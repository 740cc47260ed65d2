// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wharf-core: resource resolution primitives
//!
//! This crate provides:
//! - A bounded TTL cache with serialized, detached values
//! - Single-attempt locks and a retrying wrapper with a deadline
//! - Parameter bags with connection and credential views
//! - Resolvers that defer indirect bags to discovery services and credential stores

pub mod clock;

pub mod cache;
pub mod factory;
pub mod lock;
pub mod params;
pub mod resolve;

// Re-exports
pub use cache::{Cache, CacheConfig, CacheError, CacheExt, MemoryCache, NullCache};
pub use clock::{Clock, FakeClock, SystemClock};
pub use factory::{Factory, FactoryError};
pub use lock::{Lock, LockConfig, LockError, MemoryLock, NullLock, RetryLock};
pub use params::{ConnectionParams, CredentialParams, ParameterBag, ParamsError, ResolvedParams};
pub use resolve::{
    ConnectionResolver, CredentialResolver, CredentialStore, Descriptor, Discovery,
    MemoryCredentialStore, MemoryDiscovery, MemoryProvider, Provider, ProviderError, References,
    ResolveError, Resolver,
};
