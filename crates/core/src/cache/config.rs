// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::params::ParameterBag;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Memory cache configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Expiry applied when a store does not name its own
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Maximum number of entries; zero disables the cap
    pub max_size: usize,
}

impl CacheConfig {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_size: 1000,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Read `options.timeout` (milliseconds) and `options.max_size`
    ///
    /// Missing or malformed values keep the defaults.
    pub fn from_params(params: &ParameterBag) -> Self {
        let defaults = Self::new();
        let timeout = params
            .get_as_integer("options.timeout")
            .and_then(|ms| u64::try_from(ms).ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);
        let max_size = params
            .get_as_integer("options.max_size")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(defaults.max_size);
        Self { timeout, max_size }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
