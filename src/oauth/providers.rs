//! Built-in provider seed set.

use crate::oauth::consumer::{Consumer, StandardConsumer};
use crate::oauth::registry::{ServiceConstructor, ServiceContext};
use crate::oauth::types::ProviderEndpoints;
use std::sync::Arc;

/// Well-known providers pre-registered into every service registry.
const BUILTIN_PROVIDERS: &[(&str, &str, &str)] = &[
    (
        "facebook",
        "https://www.facebook.com/v12.0/dialog/oauth",
        "https://graph.facebook.com/v12.0/oauth/access_token",
    ),
    (
        "github",
        "https://github.com/login/oauth/authorize",
        "https://github.com/login/oauth/access_token",
    ),
    (
        "google",
        "https://accounts.google.com/o/oauth2/v2/auth",
        "https://oauth2.googleapis.com/token",
    ),
    (
        "linkedin",
        "https://www.linkedin.com/oauth/v2/authorization",
        "https://www.linkedin.com/oauth/v2/accessToken",
    ),
    (
        "microsoft",
        "https://login.microsoftonline.com/common/oauth2/v2.0/authorize",
        "https://login.microsoftonline.com/common/oauth2/v2.0/token",
    ),
    (
        "spotify",
        "https://accounts.spotify.com/authorize",
        "https://accounts.spotify.com/api/token",
    ),
];

/// Constructor building a [`StandardConsumer`] for a fixed provider.
///
/// Useful for registering additional providers that follow the standard
/// authorization-code shape and only differ in their endpoints.
pub fn standard(
    name: impl Into<String>,
    authorization_endpoint: impl Into<String>,
    token_endpoint: impl Into<String>,
) -> ServiceConstructor {
    let name = name.into();
    let authorization_endpoint = authorization_endpoint.into();
    let token_endpoint = token_endpoint.into();
    Arc::new(move |context: ServiceContext| {
        let endpoints = ProviderEndpoints::parse(&authorization_endpoint, &token_endpoint)?;
        Ok(Box::new(StandardConsumer::new(
            name.clone(),
            context.credentials,
            context.storage,
            context.transport,
            context.scope,
            endpoints,
        )) as Box<dyn Consumer>)
    })
}

pub(crate) fn builtin_services() -> Vec<(&'static str, ServiceConstructor)> {
    BUILTIN_PROVIDERS
        .iter()
        .map(|&(name, authorization_endpoint, token_endpoint)| {
            (name, standard(name, authorization_endpoint, token_endpoint))
        })
        .collect()
}
