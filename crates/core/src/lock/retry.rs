// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-retry acquisition over any single-attempt lock

use super::{Lock, LockConfig, LockError};
use crate::clock::{Clock, SystemClock};
use crate::params::ParameterBag;
use std::time::Duration;

/// Wraps a [`Lock`] backend with a blocking acquire-until-deadline loop
///
/// The loop attempts once, then sleeps `retry_interval` between attempts
/// until `timeout` has elapsed. A failed attempt is not an error; a backend
/// error ends the loop immediately.
pub struct RetryLock<L, C: Clock = SystemClock> {
    locker: L,
    config: LockConfig,
    clock: C,
}

impl<L: Lock> RetryLock<L, SystemClock> {
    pub fn new(locker: L) -> Self {
        Self::with_clock(locker, LockConfig::default(), SystemClock)
    }

    pub fn with_config(locker: L, config: LockConfig) -> Self {
        Self::with_clock(locker, config, SystemClock)
    }

    pub fn from_params(locker: L, params: &ParameterBag) -> Self {
        Self::with_config(locker, LockConfig::from_params(params))
    }
}

impl<L: Lock, C: Clock> RetryLock<L, C> {
    pub fn with_clock(locker: L, config: LockConfig, clock: C) -> Self {
        Self {
            locker,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn locker(&self) -> &L {
        &self.locker
    }

    /// Acquire `key` for `ttl`, retrying for up to `timeout`
    ///
    /// Fails with [`LockError::Conflict`] carrying the key once the deadline
    /// passes; a timeout past the clock's range never passes. Blocks the
    /// calling thread between attempts.
    pub fn acquire_lock(
        &self,
        key: &str,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<(), LockError> {
        let deadline = self.clock.now().checked_add(timeout);
        let mut attempts = 0u32;
        loop {
            attempts = attempts.saturating_add(1);
            if self.locker.try_acquire_lock(key, ttl)? {
                tracing::debug!(key, attempts, "lock acquired");
                return Ok(());
            }
            self.clock.sleep(self.config.retry_interval);
            if deadline.is_some_and(|deadline| self.clock.now() >= deadline) {
                break;
            }
        }
        Err(self.timed_out(key, timeout, attempts))
    }

    /// Async form of [`acquire_lock`](Self::acquire_lock)
    ///
    /// Waits on the tokio timer instead of blocking the thread, so callers
    /// can abandon acquisition by racing it in `tokio::select!`.
    pub async fn acquire_lock_async(
        &self,
        key: &str,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<(), LockError> {
        let deadline = tokio::time::Instant::now().checked_add(timeout);
        let mut attempts = 0u32;
        loop {
            attempts = attempts.saturating_add(1);
            if self.locker.try_acquire_lock(key, ttl)? {
                tracing::debug!(key, attempts, "lock acquired");
                return Ok(());
            }
            tokio::time::sleep(self.config.retry_interval).await;
            if deadline.is_some_and(|deadline| tokio::time::Instant::now() >= deadline) {
                break;
            }
        }
        Err(self.timed_out(key, timeout, attempts))
    }

    fn timed_out(&self, key: &str, timeout: Duration, attempts: u32) -> LockError {
        tracing::warn!(key, ?timeout, attempts, "lock acquisition timed out");
        LockError::Conflict {
            key: key.to_string(),
        }
    }
}

impl<L: Lock, C: Clock> Lock for RetryLock<L, C> {
    fn try_acquire_lock(&self, key: &str, ttl: Duration) -> Result<bool, LockError> {
        self.locker.try_acquire_lock(key, ttl)
    }

    fn release_lock(&self, key: &str) -> Result<(), LockError> {
        self.locker.release_lock(key)
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
