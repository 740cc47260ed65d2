// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter bags and the connection/credential views over them
//!
//! This module provides:
//! - **ParameterBag** - String map with dotted sections and typed reads
//! - **ConnectionParams** - Host/port/protocol view, indirect via `discovery_key`
//! - **CredentialParams** - Username/password/access view, indirect via `store_key`

mod bag;
mod connection;
mod credential;

pub use bag::{ParameterBag, ParamsError};
pub use connection::ConnectionParams;
pub use credential::CredentialParams;

use crate::resolve::Descriptor;

/// A parameter bag that may defer its real values to a provider
///
/// Indirection is purely syntactic: a bag whose indirection key is set and
/// non-empty must be looked up in a provider before use.
pub trait ResolvedParams: Clone + Send + Sync + From<ParameterBag> + 'static {
    /// Singular configuration section, e.g. `connection`
    const SECTION: &'static str;
    /// Plural configuration section, e.g. `connections`
    const MANY_SECTION: &'static str;
    /// Reserved key whose presence signals indirection
    const INDIRECTION_KEY: &'static str;

    fn params(&self) -> &ParameterBag;

    /// Locator for the providers that resolve this kind of bag
    fn provider_descriptor() -> Descriptor;

    fn indirection_key(&self) -> Option<&str> {
        self.params().get_non_empty(Self::INDIRECTION_KEY)
    }

    fn is_indirect(&self) -> bool {
        self.indirection_key().is_some()
    }

    /// Read every bag from configuration
    ///
    /// Subsections of the plural section win; otherwise the singular section
    /// yields at most one bag.
    fn many_from_config(config: &ParameterBag) -> Vec<Self> {
        let many = config.get_section(Self::MANY_SECTION);
        if !many.is_empty() {
            return many
                .section_names()
                .iter()
                .map(|name| Self::from(many.get_section(name)))
                .collect();
        }

        let single = config.get_section(Self::SECTION);
        if single.is_empty() {
            Vec::new()
        } else {
            vec![Self::from(single)]
        }
    }

    fn from_config(config: &ParameterBag) -> Option<Self> {
        Self::many_from_config(config).into_iter().next()
    }
}
