// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential parameters, kept apart from connection parameters

use super::{ParameterBag, ResolvedParams};
use crate::resolve::Descriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

const STORE_KEY: &str = "store_key";
const USERNAME: &str = "username";
const PASSWORD: &str = "password";
const ACCESS_ID: &str = "access_id";
const ACCESS_KEY: &str = "access_key";

/// Credential parameters: `username`, `password`, `access_id`, `access_key`
///
/// When `store_key` is set the credential lives in a credential store and
/// the local values are incomplete. Values are held in plain memory.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialParams(ParameterBag);

impl CredentialParams {
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

    pub fn use_credential_store(&self) -> bool {
        self.is_indirect()
    }

    pub fn store_key(&self) -> Option<&str> {
        self.indirection_key()
    }

    pub fn set_store_key(&mut self, key: impl Into<String>) {
        self.0.put(STORE_KEY, key);
    }

    /// User name, falling back to the `user` key
    pub fn username(&self) -> Option<&str> {
        self.first_of(USERNAME, "user")
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.0.put(USERNAME, username);
    }

    /// Password, falling back to the `pass` key
    pub fn password(&self) -> Option<&str> {
        self.first_of(PASSWORD, "pass")
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.0.put(PASSWORD, password);
    }

    /// Access id, falling back to the `client_id` key
    pub fn access_id(&self) -> Option<&str> {
        self.first_of(ACCESS_ID, "client_id")
    }

    pub fn set_access_id(&mut self, access_id: impl Into<String>) {
        self.0.put(ACCESS_ID, access_id);
    }

    /// Access key, falling back to the `client_key` key
    pub fn access_key(&self) -> Option<&str> {
        self.first_of(ACCESS_KEY, "client_key")
    }

    pub fn set_access_key(&mut self, access_key: impl Into<String>) {
        self.0.put(ACCESS_KEY, access_key);
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.put(key, value)
    }

    pub fn into_inner(self) -> ParameterBag {
        self.0
    }

    fn first_of(&self, key: &str, fallback: &str) -> Option<&str> {
        self.0
            .get_non_empty(key)
            .or_else(|| self.0.get_non_empty(fallback))
    }
}

// Secrets stay out of debug output
impl fmt::Debug for CredentialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialParams")
            .field("store_key", &self.store_key())
            .field("username", &self.username())
            .field("access_id", &self.access_id())
            .finish_non_exhaustive()
    }
}

impl ResolvedParams for CredentialParams {
    const SECTION: &'static str = "credential";
    const MANY_SECTION: &'static str = "credentials";
    const INDIRECTION_KEY: &'static str = STORE_KEY;

    fn params(&self) -> &ParameterBag {
        &self.0
    }

    fn provider_descriptor() -> Descriptor {
        Descriptor::new("*", "credential-store", "*", "*", "*")
    }
}

impl From<ParameterBag> for CredentialParams {
    fn from(bag: ParameterBag) -> Self {
        Self(bag)
    }
}

impl Deref for CredentialParams {
    type Target = ParameterBag;

    fn deref(&self) -> &ParameterBag {
        &self.0
    }
}

impl FromStr for CredentialParams {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        line.parse().map(Self)
    }
}

impl fmt::Display for CredentialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
