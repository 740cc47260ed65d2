// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Cache, CacheError};
use std::time::Duration;

/// Cache that stores nothing, for when caching must be switched off
///
/// Empty keys are still rejected, as with every other backend.
#[derive(Clone, Debug, Default)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

impl Cache for NullCache {
    fn store_raw(
        &self,
        key: &str,
        _value: Vec<u8>,
        _ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        check_key(key)
    }

    fn retrieve_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        check_key(key)?;
        Ok(None)
    }

    fn contains(&self, key: &str) -> Result<bool, CacheError> {
        check_key(key)?;
        Ok(false)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        check_key(key)
    }

    fn clear(&self) {}
}

fn check_key(key: &str) -> Result<(), CacheError> {
    if key.is_empty() {
        return Err(CacheError::EmptyKey);
    }
    Ok(())
}
