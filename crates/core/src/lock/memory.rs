// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock that synchronizes execution within one process
//!
//! A lock is free when it has no record or its record has expired. Taking it
//! stores `now + ttl`, so an unreleased lock frees itself after `ttl`; a ttl
//! past the clock's range holds until released. There is no heartbeat to
//! renew a held lock. Expired records are dropped on every acquire attempt.

use super::{Lock, LockError};
use crate::clock::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// In-memory lock table keyed by lock name
pub struct MemoryLock<C: Clock = SystemClock> {
    locks: Mutex<HashMap<String, Option<Instant>>>,
    clock: C,
}

impl MemoryLock<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryLock<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryLock<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Whether `key` is currently held and unexpired
    pub fn is_locked(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.lock_table()
            .get(key)
            .is_some_and(|expiration| is_held(*expiration, now))
    }

    /// Number of records in the table, expired ones included
    pub fn len(&self) -> usize {
        self.lock_table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_table().is_empty()
    }

    fn lock_table(&self) -> MutexGuard<'_, HashMap<String, Option<Instant>>> {
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock> Lock for MemoryLock<C> {
    fn try_acquire_lock(&self, key: &str, ttl: Duration) -> Result<bool, LockError> {
        if key.is_empty() {
            return Err(LockError::EmptyKey);
        }

        // Check and take under one guard so two callers cannot both see it free
        let mut locks = self.lock_table();
        let now = self.clock.now();
        locks.retain(|_, expiration| is_held(*expiration, now));
        if locks.contains_key(key) {
            return Ok(false);
        }
        locks.insert(key.to_string(), now.checked_add(ttl));
        Ok(true)
    }

    fn release_lock(&self, key: &str) -> Result<(), LockError> {
        if key.is_empty() {
            return Err(LockError::EmptyKey);
        }
        self.lock_table().remove(key);
        Ok(())
    }
}

/// `None` never expires
fn is_held(expiration: Option<Instant>, now: Instant) -> bool {
    match expiration {
        Some(expiration) => expiration > now,
        None => true,
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
