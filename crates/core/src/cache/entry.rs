// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::{Duration, Instant};

/// A serialized value with its absolute expiration
///
/// A ttl too large to add to `now` yields an entry that never expires.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    key: String,
    value: Vec<u8>,
    expiration: Option<Instant>,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: Vec<u8>, now: Instant, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            value,
            expiration: now.checked_add(ttl),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// `None` when the entry never expires
    pub fn expiration(&self) -> Option<Instant> {
        self.expiration
    }

    /// Replace the value and push the expiration out from `now`
    pub fn set_value(&mut self, value: Vec<u8>, now: Instant, ttl: Duration) {
        self.value = value;
        self.expiration = now.checked_add(ttl);
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expiration.is_some_and(|expiration| now > expiration)
    }
}
