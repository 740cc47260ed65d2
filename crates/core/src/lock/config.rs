// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::params::ParameterBag;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry lock configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// Pause between acquisition attempts
    #[serde(with = "humantime_serde")]
    pub retry_interval: Duration,
}

impl LockConfig {
    pub fn new() -> Self {
        Self {
            retry_interval: Duration::from_millis(100),
        }
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Read `options.retry_timeout` in milliseconds
    pub fn from_params(params: &ParameterBag) -> Self {
        let defaults = Self::new();
        let retry_interval = params
            .get_as_integer("options.retry_timeout")
            .and_then(|ms| u64::try_from(ms).ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_interval);
        Self { retry_interval }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self::new()
    }
}
