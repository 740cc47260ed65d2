// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cache that keeps values in process memory
//!
//! Not suitable for coordinating separate processes.

use super::{Cache, CacheConfig, CacheEntry, CacheError};
use crate::clock::{Clock, SystemClock};
use crate::params::ParameterBag;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Bounded in-memory cache with lazy expiry
///
/// Expired entries are dropped when read, or swept when a store pushes the
/// cache over `max_size`. There is no background timer.
pub struct MemoryCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<String, CacheEntry>>,
    config: CacheConfig,
    clock: C,
}

impl MemoryCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(CacheConfig::default(), SystemClock)
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn from_params(params: &ParameterBag) -> Self {
        Self::with_config(CacheConfig::from_params(params))
    }
}

impl Default for MemoryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCache<C> {
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Number of entries held, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sweep expired entries, then evict one more if still over capacity
    pub fn cleanup(&self) {
        let now = self.clock.now();
        let mut entries = self.lock_entries();
        self.sweep(&mut entries, now);
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sweep(&self, entries: &mut HashMap<String, CacheEntry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let expired = before - entries.len();

        // The entry closest to expiring stands in for least recently used
        let mut evicted = None;
        if self.config.max_size > 0 && entries.len() > self.config.max_size {
            let soonest = entries
                .values()
                .min_by_key(|entry| (entry.expiration().is_none(), entry.expiration()))
                .map(|entry| entry.key().to_string());
            if let Some(key) = soonest {
                entries.remove(&key);
                evicted = Some(key);
            }
        }

        tracing::debug!(
            expired,
            ?evicted,
            remaining = entries.len(),
            "cache cleanup"
        );
    }

    fn effective_ttl(&self, ttl: Option<Duration>) -> Duration {
        match ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.config.timeout,
        }
    }
}

impl<C: Clock> Cache for MemoryCache<C> {
    fn store_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        let ttl = self.effective_ttl(ttl);
        let now = self.clock.now();

        let mut entries = self.lock_entries();
        match entries.get_mut(key) {
            Some(entry) => entry.set_value(value, now, ttl),
            None => {
                entries.insert(key.to_string(), CacheEntry::new(key, value, now, ttl));
            }
        }

        if self.config.max_size > 0 && entries.len() > self.config.max_size {
            self.sweep(&mut entries, now);
        }
        Ok(())
    }

    fn retrieve_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        let now = self.clock.now();

        let mut entries = self.lock_entries();
        match entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value().to_vec())),
            Some(_) => {}
        }
        entries.remove(key);
        Ok(None)
    }

    fn contains(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.retrieve_raw(key)?.is_some())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        self.lock_entries().remove(key);
        Ok(())
    }

    fn clear(&self) {
        self.lock_entries().clear();
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
