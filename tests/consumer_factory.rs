//! Consumer Resolution Integration Tests
//!
//! These tests verify the complete resolution path: configuration lookup,
//! storage and transport selection, callback and scope resolution, and custom
//! service registration.

use oauth_rig::config::StaticConfig;
use oauth_rig::context::StaticRequestContext;
use oauth_rig::errors::ResolveError;
use oauth_rig::factory::ConsumerFactory;
use oauth_rig::oauth::{Credentials, ProviderEndpoints, StandardConsumer};
use oauth_rig::storage::MemoryTokenStorage;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn github_config() -> StaticConfig {
    StaticConfig::new()
        .set("consumers.github.client_id", "gh-id")
        .set("consumers.github.client_secret", "gh-secret")
        .set_list("consumers.github.scope", ["user", "repo"])
}

#[test]
fn test_unknown_service_fails() {
    let factory = ConsumerFactory::new(Arc::new(github_config()));
    let result = factory.resolve("nope", Some("https://app.example.com/cb"), None);
    assert!(matches!(
        result,
        Err(ResolveError::UnknownService(name)) if name == "nope"
    ));
}

#[test]
fn test_unknown_storage_backend_fails() {
    let config = github_config().set("storage", "Vault");
    let factory = ConsumerFactory::new(Arc::new(config));
    let result = factory.resolve("github", Some("https://app.example.com/cb"), None);
    assert!(matches!(
        result,
        Err(ResolveError::UnknownStorage(name)) if name == "Vault"
    ));
}

#[test]
fn test_missing_credentials_fail_fast() {
    let config = StaticConfig::new().set("consumers.github.client_id", "gh-id");
    let factory = ConsumerFactory::new(Arc::new(config));
    let result = factory.resolve("github", Some("https://app.example.com/cb"), None);
    assert!(matches!(
        result,
        Err(ResolveError::MissingCredentials(name)) if name == "github"
    ));
}

#[test]
fn test_configured_default_scope_is_used() {
    let factory = ConsumerFactory::new(Arc::new(github_config()));
    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(consumer.scope(), ["user", "repo"]);
}

#[test]
fn test_unconfigured_scope_defaults_to_empty() {
    let config = StaticConfig::new()
        .set("consumers.github.client_id", "gh-id")
        .set("consumers.github.client_secret", "gh-secret");
    let factory = ConsumerFactory::new(Arc::new(config));
    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert!(consumer.scope().is_empty());
}

#[test]
fn test_explicit_scope_replaces_default() {
    let factory = ConsumerFactory::new(Arc::new(github_config()));
    let scope = vec!["gist".to_string()];
    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), Some(&scope))
        .unwrap();
    assert_eq!(consumer.scope(), ["gist"]);
}

#[test]
fn test_explicitly_empty_scope_replaces_default() {
    let factory = ConsumerFactory::new(Arc::new(github_config()));
    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), Some(&[]))
        .unwrap();
    assert!(consumer.scope().is_empty());
}

#[test]
fn test_missing_callback_url_fails() {
    let factory = ConsumerFactory::new(Arc::new(github_config()));
    let result = factory.resolve("github", None, None);
    assert!(matches!(result, Err(ResolveError::MissingCallbackUrl)));
}

#[test]
fn test_request_context_supplies_callback_url() {
    let factory = ConsumerFactory::new(Arc::new(github_config())).with_request_context(Arc::new(
        StaticRequestContext::new("https://host.example.com/current"),
    ));
    let consumer = factory.resolve("github", None, None).unwrap();
    assert_eq!(
        consumer.credentials().callback_url,
        "https://host.example.com/current"
    );
}

#[test]
fn test_explicit_callback_url_overrides_context() {
    let factory = ConsumerFactory::new(Arc::new(github_config())).with_request_context(Arc::new(
        StaticRequestContext::new("https://host.example.com/current"),
    ));
    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(
        consumer.credentials().callback_url,
        "https://app.example.com/cb"
    );
}

#[test]
fn test_empty_callback_url_falls_back_to_context() {
    let factory = ConsumerFactory::new(Arc::new(github_config())).with_request_context(Arc::new(
        StaticRequestContext::new("https://host.example.com/current"),
    ));
    let consumer = factory.resolve("github", Some(""), None).unwrap();
    assert_eq!(
        consumer.credentials().callback_url,
        "https://host.example.com/current"
    );
}

#[test]
fn test_service_names_match_case_insensitively() {
    let factory = ConsumerFactory::new(Arc::new(github_config()));
    let consumer = factory
        .resolve("GitHub", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(consumer.provider(), "github");
    assert_eq!(consumer.credentials().client_id, "gh-id");
}

#[test]
fn test_registered_constructor_invoked_once_with_credentials() {
    let config = StaticConfig::new()
        .set("consumers.widgets.client_id", "w-id")
        .set("consumers.widgets.client_secret", "w-secret");
    let mut factory = ConsumerFactory::new(Arc::new(config));

    let invocations = Arc::new(AtomicUsize::new(0));
    let seen_credentials = Arc::new(Mutex::new(None::<Credentials>));

    let counter = invocations.clone();
    let seen = seen_credentials.clone();
    factory.register_service("widgets", move |context| {
        counter.fetch_add(1, Ordering::SeqCst);
        *seen.lock().unwrap() = Some(context.credentials.clone());
        let endpoints = ProviderEndpoints::parse(
            "https://widgets.example.com/authorize",
            "https://widgets.example.com/token",
        )?;
        Ok(Box::new(StandardConsumer::new(
            "widgets",
            context.credentials,
            context.storage,
            context.transport,
            context.scope,
            endpoints,
        )))
    });

    let consumer = factory
        .resolve("widgets", Some("https://app.example.com/cb"), Some(&[]))
        .unwrap();

    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert!(consumer.scope().is_empty());
    let credentials = seen_credentials.lock().unwrap().clone().unwrap();
    assert_eq!(credentials.client_id, "w-id");
    assert_eq!(credentials.client_secret, "w-secret");
    assert_eq!(credentials.callback_url, "https://app.example.com/cb");
}

#[test]
fn test_memory_backed_resolution_scenario() {
    let config = StaticConfig::new()
        .set("consumers.foo.client_id", "A")
        .set("consumers.foo.client_secret", "B")
        .set_list("consumers.foo.scope", ["read"])
        .set("storage", "Memory");
    let mut factory = ConsumerFactory::new(Arc::new(config));
    factory.register_service("foo", |context| {
        let endpoints = ProviderEndpoints::parse(
            "https://foo.example.com/authorize",
            "https://foo.example.com/token",
        )?;
        Ok(Box::new(StandardConsumer::new(
            "foo",
            context.credentials,
            context.storage,
            context.transport,
            context.scope,
            endpoints,
        )))
    });

    let consumer = factory.resolve("foo", Some("http://cb"), None).unwrap();
    assert_eq!(consumer.storage().name(), "Memory");
    assert_eq!(
        consumer.credentials(),
        &Credentials::new("A", "B", "http://cb")
    );
    assert_eq!(consumer.scope(), ["read"]);

    let consumer = factory.resolve("foo", Some("http://cb"), Some(&[])).unwrap();
    assert!(consumer.scope().is_empty());
}

#[test]
fn test_set_http_transport_reaches_new_consumers() {
    let config = StaticConfig::new()
        .set("consumers.probe.client_id", "p-id")
        .set("consumers.probe.client_secret", "p-secret");
    let mut factory = ConsumerFactory::new(Arc::new(config));

    let seen_transport = Arc::new(Mutex::new(None::<&'static str>));
    let seen = seen_transport.clone();
    factory.register_service("probe", move |context| {
        *seen.lock().unwrap() = Some(context.transport.name());
        let endpoints = ProviderEndpoints::parse(
            "https://probe.example.com/authorize",
            "https://probe.example.com/token",
        )?;
        Ok(Box::new(StandardConsumer::new(
            "probe",
            context.credentials,
            context.storage,
            context.transport,
            context.scope,
            endpoints,
        )))
    });

    factory
        .resolve("probe", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(*seen_transport.lock().unwrap(), Some("Reqwest"));

    factory.set_http_transport("Mock").unwrap();
    factory
        .resolve("probe", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(*seen_transport.lock().unwrap(), Some("Mock"));
}

#[test]
fn test_unknown_transport_fails() {
    let mut factory = ConsumerFactory::new(Arc::new(github_config()));
    let result = factory.set_http_transport("Carrier");
    assert!(matches!(
        result,
        Err(ResolveError::UnknownTransport(name)) if name == "Carrier"
    ));
}

#[test]
fn test_registered_storage_backend_is_selectable() {
    let config = github_config().set("storage", "Vault");
    let mut factory = ConsumerFactory::new(Arc::new(config));
    factory.register_storage("Vault", || Box::new(MemoryTokenStorage::new()));

    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(consumer.storage().name(), "Memory");
}

#[test]
fn test_registration_shadows_builtin_service() {
    let mut factory = ConsumerFactory::new(Arc::new(github_config()));
    factory.register_service("github", |context| {
        let endpoints = ProviderEndpoints::parse(
            "https://git.example.com/authorize",
            "https://git.example.com/token",
        )?;
        Ok(Box::new(StandardConsumer::new(
            "github-enterprise",
            context.credentials,
            context.storage,
            context.transport,
            context.scope,
            endpoints,
        )))
    });

    let consumer = factory
        .resolve("github", Some("https://app.example.com/cb"), None)
        .unwrap();
    assert_eq!(consumer.provider(), "github-enterprise");
}
