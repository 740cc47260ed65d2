// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory named locks with bounded-retry acquisition
//!
//! This module provides:
//! - **Lock** - Single-attempt primitive implemented by backends
//! - **MemoryLock** - Process-local backend with self-expiring locks
//! - **NullLock** - Backend that always grants
//! - **RetryLock** - Retries a backend until a deadline, then fails with a conflict

mod config;
mod memory;
mod null;
mod retry;

pub use config::LockConfig;
pub use memory::MemoryLock;
pub use null::NullLock;
pub use retry::RetryLock;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from lock operations
#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock key cannot be empty")]
    EmptyKey,
    #[error("acquiring lock {key} failed on timeout")]
    Conflict { key: String },
    #[error("lock backend error: {0}")]
    Backend(String),
}

impl LockError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            LockError::EmptyKey => "EMPTY_KEY",
            LockError::Conflict { .. } => "LOCK_TIMEOUT",
            LockError::Backend(_) => "LOCK_BACKEND",
        }
    }

    /// The lock key carried by a conflict
    pub fn key(&self) -> Option<&str> {
        match self {
            LockError::Conflict { key } => Some(key),
            _ => None,
        }
    }
}

/// Single-attempt lock primitive
pub trait Lock: Send + Sync {
    /// Try once to take `key` for `ttl`; never blocks
    fn try_acquire_lock(&self, key: &str, ttl: Duration) -> Result<bool, LockError>;

    /// Release `key`; releasing a free lock is a no-op
    fn release_lock(&self, key: &str) -> Result<(), LockError>;
}

impl<L: Lock + ?Sized> Lock for Arc<L> {
    fn try_acquire_lock(&self, key: &str, ttl: Duration) -> Result<bool, LockError> {
        (**self).try_acquire_lock(key, ttl)
    }

    fn release_lock(&self, key: &str) -> Result<(), LockError> {
        (**self).release_lock(key)
    }
}
