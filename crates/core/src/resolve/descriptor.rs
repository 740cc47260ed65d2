// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component descriptors with wildcard matching

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WILDCARD: &str = "*";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("descriptor '{0}' must have 5 ':'-separated parts")]
    InvalidFormat(String),
}

/// Identifies a component by `group:capability:kind:name:version`
///
/// Any field may be `*`, which matches every value when the descriptor is
/// used as a locator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor {
    group: String,
    capability: String,
    kind: String,
    name: String,
    version: String,
}

impl Descriptor {
    pub fn new(
        group: impl Into<String>,
        capability: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            capability: capability.into(),
            kind: kind.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn group(&self) -> Option<&str> {
        non_wildcard(&self.group)
    }

    pub fn capability(&self) -> Option<&str> {
        non_wildcard(&self.capability)
    }

    pub fn kind(&self) -> Option<&str> {
        non_wildcard(&self.kind)
    }

    pub fn name(&self) -> Option<&str> {
        non_wildcard(&self.name)
    }

    pub fn version(&self) -> Option<&str> {
        non_wildcard(&self.version)
    }

    /// Field-wise match where `*` on either side matches anything
    pub fn matches(&self, other: &Descriptor) -> bool {
        field_matches(&self.group, &other.group)
            && field_matches(&self.capability, &other.capability)
            && field_matches(&self.kind, &other.kind)
            && field_matches(&self.name, &other.name)
            && field_matches(&self.version, &other.version)
    }
}

fn non_wildcard(field: &str) -> Option<&str> {
    (field != WILDCARD).then_some(field)
}

fn field_matches(a: &str, b: &str) -> bool {
    a == WILDCARD || b == WILDCARD || a == b
}

impl FromStr for Descriptor {
    type Err = DescriptorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(':').collect();
        match parts.as_slice() {
            [group, capability, kind, name, version] => {
                Ok(Self::new(*group, *capability, *kind, *name, *version))
            }
            _ => Err(DescriptorError::InvalidFormat(value.to_string())),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.group, self.capability, self.kind, self.name, self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let descriptor: Descriptor = "wharf:cache:memory:default:1.0".parse().unwrap();
        assert_eq!(descriptor.group(), Some("wharf"));
        assert_eq!(descriptor.capability(), Some("cache"));
        assert_eq!(descriptor.kind(), Some("memory"));
        assert_eq!(descriptor.name(), Some("default"));
        assert_eq!(descriptor.version(), Some("1.0"));
        assert_eq!(descriptor.to_string(), "wharf:cache:memory:default:1.0");
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert_eq!(
            "a:b:c".parse::<Descriptor>(),
            Err(DescriptorError::InvalidFormat("a:b:c".to_string()))
        );
    }

    #[test]
    fn wildcard_fields_are_none() {
        let locator = Descriptor::new("*", "discovery", "*", "*", "*");
        assert_eq!(locator.group(), None);
        assert_eq!(locator.capability(), Some("discovery"));
    }

    #[test]
    fn wildcards_match_in_both_directions() {
        let locator = Descriptor::new("*", "discovery", "*", "*", "*");
        let component = Descriptor::new("wharf", "discovery", "memory", "default", "1.0");
        let other = Descriptor::new("wharf", "credential-store", "memory", "default", "1.0");

        assert!(locator.matches(&component));
        assert!(component.matches(&locator));
        assert!(!locator.matches(&other));
    }
}
