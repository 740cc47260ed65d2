// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection parameters for reaching external services

use super::{ParameterBag, ResolvedParams};
use crate::resolve::Descriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

const DISCOVERY_KEY: &str = "discovery_key";
const PROTOCOL: &str = "protocol";
const HOST: &str = "host";
const IP: &str = "ip";
const PORT: &str = "port";
const URI: &str = "uri";

/// Connection parameters: `protocol`, `host`, `port`, `uri`, plus any custom keys
///
/// When `discovery_key` is set the other fields are incomplete and must be
/// filled in by a discovery provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionParams(ParameterBag);

impl ConnectionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tuples<K, V>(tuples: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(ParameterBag::from_tuples(tuples))
    }

    pub fn use_discovery(&self) -> bool {
        self.is_indirect()
    }

    pub fn discovery_key(&self) -> Option<&str> {
        self.indirection_key()
    }

    pub fn set_discovery_key(&mut self, key: impl Into<String>) {
        self.0.put(DISCOVERY_KEY, key);
    }

    pub fn protocol(&self) -> Option<&str> {
        self.0.get_non_empty(PROTOCOL)
    }

    pub fn protocol_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.protocol().unwrap_or(default)
    }

    pub fn set_protocol(&mut self, protocol: impl Into<String>) {
        self.0.put(PROTOCOL, protocol);
    }

    /// Host name, falling back to the `ip` key
    pub fn host(&self) -> Option<&str> {
        self.0.get_non_empty(HOST).or_else(|| self.0.get_non_empty(IP))
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.0.put(HOST, host);
    }

    pub fn port(&self) -> Option<u16> {
        self.0
            .get_as_integer(PORT)
            .and_then(|port| u16::try_from(port).ok())
    }

    pub fn port_or(&self, default: u16) -> u16 {
        self.port().unwrap_or(default)
    }

    pub fn set_port(&mut self, port: u16) {
        self.0.put(PORT, port.to_string());
    }

    pub fn uri(&self) -> Option<&str> {
        self.0.get_non_empty(URI)
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.0.put(URI, uri);
    }

    /// Set an arbitrary key
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.put(key, value)
    }

    pub fn into_inner(self) -> ParameterBag {
        self.0
    }
}

impl ResolvedParams for ConnectionParams {
    const SECTION: &'static str = "connection";
    const MANY_SECTION: &'static str = "connections";
    const INDIRECTION_KEY: &'static str = DISCOVERY_KEY;

    fn params(&self) -> &ParameterBag {
        &self.0
    }

    fn provider_descriptor() -> Descriptor {
        Descriptor::new("*", "discovery", "*", "*", "*")
    }
}

impl From<ParameterBag> for ConnectionParams {
    fn from(bag: ParameterBag) -> Self {
        Self(bag)
    }
}

impl Deref for ConnectionParams {
    type Target = ParameterBag;

    fn deref(&self) -> &ParameterBag {
        &self.0
    }
}

impl FromStr for ConnectionParams {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        line.parse().map(Self)
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
