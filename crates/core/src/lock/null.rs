// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Lock, LockError};
use std::time::Duration;

/// Lock that always grants, for when locking must be switched off
#[derive(Clone, Debug, Default)]
pub struct NullLock;

impl NullLock {
    pub fn new() -> Self {
        Self
    }
}

impl Lock for NullLock {
    fn try_acquire_lock(&self, key: &str, _ttl: Duration) -> Result<bool, LockError> {
        if key.is_empty() {
            return Err(LockError::EmptyKey);
        }
        Ok(true)
    }

    fn release_lock(&self, key: &str) -> Result<(), LockError> {
        if key.is_empty() {
            return Err(LockError::EmptyKey);
        }
        Ok(())
    }
}
