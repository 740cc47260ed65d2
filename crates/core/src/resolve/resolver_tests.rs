// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::resolve::{MemoryCredentialStore, MemoryDiscovery, ProviderError};
use yare::parameterized;

const CID: &str = "123";

fn discovery_locator() -> Descriptor {
    Descriptor::new("wharf", "discovery", "memory", "default", "1.0")
}

fn direct(host: &str) -> ConnectionParams {
    ConnectionParams::from_tuples([("host", host), ("port", "8080")])
}

fn indirect(key: &str) -> ConnectionParams {
    ConnectionParams::from_tuples([("discovery_key", key)])
}

fn with_discovery(discovery: Arc<MemoryDiscovery>) -> References {
    let mut references = References::new();
    references.put_provider::<ConnectionParams>(discovery_locator(), discovery);
    references
}

/// Provider that fails every call
struct FailingDiscovery;

impl Provider<ConnectionParams> for FailingDiscovery {
    fn register(
        &self,
        _correlation_id: &str,
        _key: &str,
        _params: ConnectionParams,
    ) -> Result<ConnectionParams, ProviderError> {
        Err(ProviderError::unavailable("discovery is down"))
    }

    fn resolve_one(
        &self,
        _correlation_id: &str,
        _key: &str,
    ) -> Result<Option<ConnectionParams>, ProviderError> {
        Err(ProviderError::unavailable("discovery is down"))
    }

    fn resolve_all(
        &self,
        _correlation_id: &str,
        _key: &str,
    ) -> Result<Vec<ConnectionParams>, ProviderError> {
        Err(ProviderError::backend("discovery is down"))
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn configures_single_connection_section() {
    let config = ParameterBag::from_tuples([
        ("connection.host", "10.1.1.100"),
        ("connection.port", "8080"),
    ]);
    let resolver = ConnectionResolver::from_config(&config, None);

    assert_eq!(resolver.get_all().len(), 1);
    assert_eq!(resolver.get_all()[0].host(), Some("10.1.1.100"));
}

#[test]
fn plural_section_wins_over_singular() {
    let config = ParameterBag::from_tuples([
        ("connection.host", "ignored"),
        ("connections.a.host", "a.example.com"),
        ("connections.b.discovery_key", "b"),
    ]);
    let resolver = ConnectionResolver::from_config(&config, None);

    let hosts: Vec<_> = resolver.get_all().iter().map(|c| c.host()).collect();
    assert_eq!(hosts, vec![Some("a.example.com"), None]);
    assert!(resolver.get_all()[1].is_indirect());
}

#[test]
fn configures_credentials() {
    let config = ParameterBag::from_tuples([
        ("credential.user", "admin"),
        ("credential.pass", "secret"),
    ]);
    let resolver = CredentialResolver::from_config(&config, None);

    let credential = resolver.resolve(CID).unwrap().unwrap();
    assert_eq!(credential.username(), Some("admin"));
    assert_eq!(credential.password(), Some("secret"));
}

#[test]
fn empty_resolver_resolves_nothing_without_providers() {
    let resolver = ConnectionResolver::new();
    assert_eq!(resolver.resolve(CID).unwrap(), None);
    assert!(resolver.resolve_all(CID).unwrap().is_empty());
}

// =============================================================================
// Resolve
// =============================================================================

#[test]
fn direct_bag_resolves_without_any_provider() {
    let mut resolver = ConnectionResolver::new();
    resolver.add(direct("10.1.1.100"));

    assert_eq!(resolver.resolve(CID).unwrap(), Some(direct("10.1.1.100")));
    assert_eq!(resolver.resolve_all(CID).unwrap(), vec![direct("10.1.1.100")]);
}

#[test]
fn first_direct_bag_wins_over_earlier_indirect() {
    let mut resolver = ConnectionResolver::new();
    resolver.add(indirect("x"));
    resolver.add(direct("b"));
    resolver.add(direct("c"));

    assert_eq!(resolver.resolve(CID).unwrap(), Some(direct("b")));
}

#[parameterized(
    no_references = { None },
    references_without_discovery = { Some(References::new()) },
)]
fn indirect_bag_without_provider_is_missing_provider(references: Option<References>) {
    let mut resolver = ConnectionResolver::new();
    if let Some(references) = references {
        resolver.set_references(references);
    }
    resolver.add(indirect("x"));

    let err = resolver.resolve(CID).unwrap_err();
    assert!(matches!(&err, ResolveError::MissingProvider { descriptor }
        if descriptor.capability() == Some("discovery")));
    assert!(matches!(
        resolver.resolve_all(CID),
        Err(ResolveError::MissingProvider { .. })
    ));
}

#[test]
fn credential_store_does_not_satisfy_discovery() {
    let mut references = References::new();
    references.put_provider::<CredentialParams>(
        Descriptor::new("wharf", "credential-store", "memory", "default", "1.0"),
        Arc::new(MemoryCredentialStore::new()),
    );
    let mut resolver = ConnectionResolver::new();
    resolver.set_references(references);
    resolver.add(indirect("x"));

    assert!(matches!(
        resolver.resolve(CID),
        Err(ResolveError::MissingProvider { .. })
    ));
}

#[test]
fn indirect_bag_with_empty_provider_is_not_found() {
    let mut resolver =
        ConnectionResolver::from_config(&ParameterBag::new(), Some(with_discovery(Arc::default())));
    resolver.add(indirect("x"));

    assert_eq!(resolver.resolve(CID).unwrap(), None);
    assert!(resolver.resolve_all(CID).unwrap().is_empty());
}

#[test]
fn indirect_bags_are_tried_in_order() {
    let discovery = Arc::new(MemoryDiscovery::new());
    discovery.register(CID, "second", direct("from-second")).unwrap();

    let mut resolver = ConnectionResolver::new();
    resolver.set_references(with_discovery(Arc::clone(&discovery)));
    resolver.add(indirect("first"));
    resolver.add(indirect("second"));

    assert_eq!(resolver.resolve(CID).unwrap(), Some(direct("from-second")));
}

#[test]
fn first_provider_with_a_result_wins() {
    let empty = Arc::new(MemoryDiscovery::new());
    let full = Arc::new(MemoryDiscovery::new());
    full.register(CID, "x", direct("found")).unwrap();

    let mut references = with_discovery(empty);
    references.put_provider::<ConnectionParams>(discovery_locator(), full);
    let mut resolver = ConnectionResolver::new();
    resolver.set_references(references);
    resolver.add(indirect("x"));

    assert_eq!(resolver.resolve(CID).unwrap(), Some(direct("found")));
}

#[test]
fn provider_error_surfaces_verbatim() {
    let mut references = References::new();
    references.put_provider::<ConnectionParams>(discovery_locator(), Arc::new(FailingDiscovery));
    let mut resolver = ConnectionResolver::new();
    resolver.set_references(references);
    resolver.add(indirect("x"));

    assert!(matches!(
        resolver.resolve(CID),
        Err(ResolveError::Provider(ProviderError::Unavailable(_)))
    ));
    assert!(matches!(
        resolver.resolve_all(CID),
        Err(ResolveError::Provider(ProviderError::Backend(_)))
    ));
}

#[test]
fn custom_provider_descriptor_narrows_lookup() {
    let discovery = Arc::new(MemoryDiscovery::new());
    discovery.register(CID, "x", direct("found")).unwrap();

    let mut resolver = ConnectionResolver::new()
        .with_provider_descriptor(Descriptor::new("*", "discovery", "consul", "*", "*"));
    resolver.set_references(with_discovery(discovery));
    resolver.add(indirect("x"));

    assert!(matches!(
        resolver.resolve(CID),
        Err(ResolveError::MissingProvider { .. })
    ));
}

// =============================================================================
// ResolveAll
// =============================================================================

#[test]
fn resolve_all_concatenates_direct_then_every_provider() {
    let first = Arc::new(MemoryDiscovery::new());
    first.register(CID, "x", direct("one")).unwrap();
    let second = Arc::new(MemoryDiscovery::new());
    second.register(CID, "x", direct("two")).unwrap();
    second.register(CID, "x", direct("three")).unwrap();

    let mut references = with_discovery(first);
    references.put_provider::<ConnectionParams>(discovery_locator(), second);
    let mut resolver = ConnectionResolver::new();
    resolver.set_references(references);
    resolver.add(indirect("x"));
    resolver.add(direct("local"));

    let hosts: Vec<String> = resolver
        .resolve_all(CID)
        .unwrap()
        .iter()
        .filter_map(|c| c.host().map(str::to_string))
        .collect();
    assert_eq!(hosts, vec!["local", "one", "two", "three"]);
}

// =============================================================================
// Register
// =============================================================================

#[test]
fn register_direct_bag_is_a_noop() {
    let mut resolver = ConnectionResolver::new();
    assert!(!resolver.register(CID, direct("a")).unwrap());
    assert!(resolver.get_all().is_empty());
}

#[test]
fn register_without_provider_fails() {
    let mut resolver = ConnectionResolver::new();
    assert!(matches!(
        resolver.register(CID, indirect("x")),
        Err(ResolveError::MissingProvider { .. })
    ));
    assert!(resolver.get_all().is_empty());
}

#[test]
fn register_forwards_to_every_provider_and_keeps_bag() {
    let first = Arc::new(MemoryDiscovery::new());
    let second = Arc::new(MemoryDiscovery::new());
    let mut references = with_discovery(Arc::clone(&first));
    references.put_provider::<ConnectionParams>(discovery_locator(), Arc::clone(&second) as Arc<dyn Provider<ConnectionParams>>);

    let mut resolver = ConnectionResolver::new();
    resolver.set_references(references);
    let mut bag = indirect("x");
    bag.set_host("registered");

    assert!(resolver.register(CID, bag.clone()).unwrap());

    assert_eq!(resolver.get_all(), &[bag.clone()]);
    assert_eq!(first.resolve_one(CID, "x").unwrap(), Some(bag.clone()));
    assert_eq!(second.resolve_one(CID, "x").unwrap(), Some(bag));
}

#[test]
fn register_failure_leaves_local_list_unchanged() {
    let mut references = References::new();
    references.put_provider::<ConnectionParams>(discovery_locator(), Arc::new(FailingDiscovery));
    let mut resolver = ConnectionResolver::new();
    resolver.set_references(references);

    assert!(matches!(
        resolver.register(CID, indirect("x")),
        Err(ResolveError::Provider(_))
    ));
    assert!(resolver.get_all().is_empty());
}
