// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process caching with per-entry expiry and a size cap
//!
//! Backends store serialized bytes; the typed [`CacheExt`] layer encodes
//! values with serde on the way in and decodes a detached copy on the way out.

mod config;
mod entry;
mod memory;
mod null;

pub use config::CacheConfig;
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use null::NullCache;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache key cannot be empty")]
    EmptyKey,
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Byte-level cache backend
pub trait Cache: Send + Sync {
    /// Store bytes under `key`
    ///
    /// `None` or a zero `ttl` uses the backend's default timeout.
    fn store_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError>;

    /// Bytes stored under `key`, or `None` when missing or expired
    fn retrieve_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Whether an unexpired value exists for `key`
    fn contains(&self, key: &str) -> Result<bool, CacheError>;

    fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry
    fn clear(&self);
}

impl<C: Cache + ?Sized> Cache for Arc<C> {
    fn store_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        (**self).store_raw(key, value, ttl)
    }

    fn retrieve_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).retrieve_raw(key)
    }

    fn contains(&self, key: &str) -> Result<bool, CacheError> {
        (**self).contains(key)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        (**self).remove(key)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// Typed store/retrieve over any [`Cache`]
pub trait CacheExt: Cache {
    /// Serialize and store `value`, handing it back on success
    ///
    /// A value that fails to serialize leaves any existing entry untouched.
    fn store<T: Serialize>(
        &self,
        key: &str,
        value: T,
        ttl: Option<Duration>,
    ) -> Result<T, CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        let bytes = serde_json::to_vec(&value)?;
        self.store_raw(key, bytes, ttl)?;
        Ok(value)
    }

    /// Decode a fresh copy of the value stored under `key`
    fn retrieve<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.retrieve_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
