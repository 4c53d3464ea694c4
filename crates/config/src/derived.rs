//! Fields computed from already-resolved values
//!
//! Runs after the override has been merged, so every default here reflects
//! the user's host and port settings rather than the built-in ones.

use crate::codec::PartialConfig;
use crate::schema::Config;
use tracing::debug;
use types::{ConfigError, Environment, ProxyDescriptor, Region};
use url::Url;

/// Fill in derived fields, in order.
///
/// `overrides` is the raw override the config was merged from; it decides
/// which proxy flags were set explicitly.
pub fn apply_derived(
    config: &mut Config,
    env: Environment,
    overrides: &PartialConfig,
) -> Result<(), ConfigError> {
    if config.oauth_redirect_uri.is_empty() {
        config.oauth_redirect_uri = format!("http://{}:{}", config.vite.host, config.vite.port);
    }
    let hostname = redirect_hostname(&config.oauth_redirect_uri)?;

    if config.game_server.api_server_url.is_empty() {
        config.game_server.api_server_url =
            format!("http://{}:{}", config.api_server.host, config.api_server.port);
    }

    let computed = ProxyDescriptor {
        google: config.secrets.google_login_enabled(),
        discord: config.secrets.discord_login_enabled(),
        mock: config.debug.allow_mock_account,
        extra: Default::default(),
    };
    let proxy = with_explicit_flags(computed, overrides, &hostname);
    debug!(
        hostname = %hostname,
        google = proxy.google,
        discord = proxy.discord,
        mock = proxy.mock,
        "Login proxy resolved"
    );
    config.proxies.insert(hostname, proxy);

    if env.is_development() && !config.regions.contains_key("local") {
        let region = Region::local(config.game_server.port);
        debug!(address = %region.address, "Seeding local region");
        config.regions.insert("local".to_string(), region);
    }

    Ok(())
}

/// Host part of the OAuth redirect URI
pub fn redirect_hostname(uri: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        field: "oauthRedirectURI".to_string(),
        value: uri.to_string(),
    };

    let url = Url::parse(uri).map_err(|_| invalid())?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(invalid()),
    }
}

// Keys the user wrote for this hostname win over the computed flags; keys
// other than the flags are carried over unchanged.
fn with_explicit_flags(
    mut proxy: ProxyDescriptor,
    overrides: &PartialConfig,
    hostname: &str,
) -> ProxyDescriptor {
    let explicit = |flag: &str| {
        overrides
            .get_path(&["proxies", hostname, flag])
            .and_then(|value| value.as_bool())
    };

    if let Some(google) = explicit("google") {
        proxy.google = google;
    }
    if let Some(discord) = explicit("discord") {
        proxy.discord = discord;
    }
    if let Some(mock) = explicit("mock") {
        proxy.mock = mock;
    }

    if let Some(written) = overrides
        .get_path(&["proxies", hostname])
        .and_then(|value| value.as_object())
    {
        proxy.extra = written
            .iter()
            .filter(|(key, value)| {
                !matches!(key.as_str(), "google" | "discord" | "mock") && !value.is_null()
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    }
    proxy
}
