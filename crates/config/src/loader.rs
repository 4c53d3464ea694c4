//! Configuration loader implementation

use crate::codec::{self, PartialConfig, CONFIG_FILE_NAME};
use crate::derived::apply_derived;
use crate::merge::deep_merge;
use crate::schema::Config;
use crate::secrets;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{error, info};
use types::{ConfigError, Environment};

/// Configuration loader that layers the override file over built-in defaults
pub struct ConfigLoader;

impl ConfigLoader {
    /// Location of the override file inside `base_dir`
    pub fn config_path<P: AsRef<Path>>(base_dir: P) -> PathBuf {
        base_dir.as_ref().join(CONFIG_FILE_NAME)
    }

    /// Resolve the configuration for `env` from the override file in `base_dir`.
    ///
    /// Creates the override file with fresh secrets if it does not exist yet.
    pub fn resolve<P: AsRef<Path>>(env: Environment, base_dir: P) -> Result<Config> {
        let config_path = Self::config_path(base_dir);
        let overrides = Self::load_or_create(&config_path)?;

        let config = Self::resolve_with(env, &overrides)
            .with_context(|| format!("Failed to resolve configuration from {}", config_path.display()))?;

        info!(
            environment = %env,
            api_server = %format!("{}:{}", config.api_server.host, config.api_server.port),
            game_server = %format!("{}:{}", config.game_server.host, config.game_server.port),
            regions = config.regions.len(),
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Resolve configuration from override text without touching the filesystem
    pub fn load_from_str(env: Environment, text: &str) -> Result<Config> {
        let overrides = codec::parse(text).context("Failed to parse configuration from string")?;
        Ok(Self::resolve_with(env, &overrides)?)
    }

    /// Merge `overrides` onto the defaults for `env` and compute derived fields
    pub fn resolve_with(env: Environment, overrides: &PartialConfig) -> Result<Config, ConfigError> {
        let mut tree = Config::defaults(env)
            .to_value()
            .map_err(|e| ConfigError::ParseError(format!("failed to build defaults: {}", e)))?;
        deep_merge(&mut tree, &overrides.clone().into_value());

        let mut config = Config::from_value(tree).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        apply_derived(&mut config, env, overrides)?;
        Ok(config)
    }

    /// Read the override file, or create it with generated secrets on first run
    fn load_or_create(config_path: &Path) -> Result<PartialConfig> {
        if config_path.exists() {
            info!("Sourcing config {}", config_path.display());
            return Ok(Self::read_override(config_path)?);
        }

        info!("Config file {} doesn't exist, creating", config_path.display());
        let overrides = secrets::initial_override();
        write_override(config_path, &overrides)
            .context("Failed to create configuration file")?;
        Ok(overrides)
    }

    fn read_override(config_path: &Path) -> Result<PartialConfig, ConfigError> {
        let text = fs::read_to_string(config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: config_path.display().to_string(),
                }
            } else {
                ConfigError::io(config_path, e)
            }
        })?;
        codec::parse(&text)
    }

    /// Merge `patch` into the persisted override file and rewrite it.
    ///
    /// Best effort: failures are logged and swallowed. Derived fields are not
    /// recomputed; they are rebuilt on the next [`ConfigLoader::resolve`].
    pub fn save<P: AsRef<Path>>(base_dir: P, patch: &PartialConfig) {
        match Self::try_save(base_dir, patch) {
            Ok(path) => info!("Saved config file {}", path.display()),
            Err(e) => error!("Failed saving config: {:#}", e),
        }
    }

    /// Fallible form of [`ConfigLoader::save`], returning the rewritten path
    pub fn try_save<P: AsRef<Path>>(base_dir: P, patch: &PartialConfig) -> Result<PathBuf> {
        let config_path = Self::config_path(base_dir);

        let mut overrides = Self::read_override(&config_path)
            .context("Failed to read existing configuration file")?;
        overrides.merge(patch);

        write_override(&config_path, &overrides)
            .context("Failed to write configuration file")?;
        Ok(config_path)
    }
}

/// Replace the override file in one step via a uniquely named sibling file
fn write_override(config_path: &Path, overrides: &PartialConfig) -> Result<(), ConfigError> {
    let text = codec::serialize(overrides)?;
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .map_err(|e| ConfigError::io(tmp.path(), e))?;
    tmp.persist(config_path)
        .map_err(|e| ConfigError::io(config_path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use types::ProcessMode;

    fn write_config(dir: &TempDir, text: &str) {
        fs::write(ConfigLoader::config_path(dir.path()), text).unwrap();
    }

    fn read_config(dir: &TempDir) -> PartialConfig {
        let text = fs::read_to_string(ConfigLoader::config_path(dir.path())).unwrap();
        codec::parse(&text).unwrap()
    }

    #[test]
    fn test_first_run_creates_file_with_secrets() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::resolve(Environment::Development, dir.path()).unwrap();

        assert_eq!(config.api_server.port, 8000);
        assert!(!config.secrets.api_key.is_empty());
        assert!(!config.secrets.loadout_secret.is_empty());
        assert!(!config.secrets.ip_secret.is_empty());

        let persisted = read_config(&dir);
        let secrets = persisted.get_path(&["secrets"]).unwrap().as_object().unwrap();
        assert_eq!(secrets.len(), 3);
        assert_eq!(secrets["SURVEV_API_KEY"], json!(config.secrets.api_key));
        assert!(secrets.values().all(|v| !v.as_str().unwrap().is_empty()));
    }

    #[test]
    fn test_secrets_are_stable_across_resolutions() {
        let dir = TempDir::new().unwrap();
        let first = ConfigLoader::resolve(Environment::Production, dir.path()).unwrap();
        let second = ConfigLoader::resolve(Environment::Production, dir.path()).unwrap();
        assert_eq!(first.secrets, second.secrets);
    }

    #[test]
    fn test_existing_file_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let text = "{\n  // hand written\n  gameTps: 60,\n}\n";
        write_config(&dir, text);

        let config = ConfigLoader::resolve(Environment::Production, dir.path()).unwrap();
        assert_eq!(config.game_tps, 60);
        // no secrets generated for an existing file
        assert!(config.secrets.api_key.is_empty());
        assert_eq!(
            fs::read_to_string(ConfigLoader::config_path(dir.path())).unwrap(),
            text
        );
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(ConfigLoader::resolve(Environment::Development, &missing).is_err());
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "{ apiServer: { port: ");
        let err = ConfigLoader::resolve(Environment::Development, dir.path()).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_wrong_type_is_fatal() {
        let result = ConfigLoader::load_from_str(Environment::Development, "{ apiServer: { port: 'eighty' } }");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_precedence() {
        let config = ConfigLoader::load_from_str(
            Environment::Development,
            "{ apiServer: { port: 9000 }, database: { host: 'db.internal' }, processMode: 'multi' }",
        )
        .unwrap();

        assert_eq!(config.api_server.port, 9000);
        assert_eq!(config.api_server.host, "0.0.0.0");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.process_mode, ProcessMode::Multi);
        assert_eq!(config.net_sync_tps, 33);
    }

    #[test]
    fn test_modes_replaced_wholesale() {
        let config = ConfigLoader::load_from_str(
            Environment::Production,
            "{ modes: [{ mapName: 'desert', teamMode: 2, enabled: false }] }",
        )
        .unwrap();
        assert_eq!(config.modes.len(), 1);
        assert_eq!(config.modes[0].map_name, "desert");
        assert!(!config.modes[0].enabled);
    }

    #[test]
    fn test_redirect_uri_follows_vite_override() {
        let config = ConfigLoader::load_from_str(
            Environment::Development,
            "{ vite: { host: 'dev.survev.local', port: 5173 } }",
        )
        .unwrap();

        let url = url::Url::parse(&config.oauth_redirect_uri).unwrap();
        assert_eq!(url.host_str(), Some("dev.survev.local"));
        assert_eq!(url.port(), Some(5173));
        assert!(config.proxies.contains_key("dev.survev.local"));
    }

    #[test]
    fn test_api_server_url_follows_api_server_override() {
        let config = ConfigLoader::load_from_str(
            Environment::Production,
            "{ apiServer: { host: '10.0.0.2', port: 8100 } }",
        )
        .unwrap();
        assert_eq!(config.game_server.api_server_url, "http://10.0.0.2:8100");
    }

    #[test]
    fn test_provider_flags() {
        let config = ConfigLoader::load_from_str(
            Environment::Production,
            "{ secrets: { GOOGLE_CLIENT_ID: 'gid', GOOGLE_SECRET_ID: 'gsecret', DISCORD_CLIENT_ID: 'did' } }",
        )
        .unwrap();
        let proxy = &config.proxies["127.0.0.1"];
        assert!(proxy.google);
        assert!(!proxy.discord);
        assert!(!proxy.mock);
    }

    #[test]
    fn test_partial_region_resolves() {
        let config = ConfigLoader::load_from_str(
            Environment::Production,
            "{ regions: { eu: { address: 'eu.survev.io:443', https: true }, na: { address: 'na.survev.io:443' } } }",
        )
        .unwrap();

        let eu = &config.regions["eu"];
        assert_eq!(eu.address, "eu.survev.io:443");
        assert!(eu.https);
        assert!(eu.l10n.is_empty());

        let na = &config.regions["na"];
        assert!(!na.https);
        assert_eq!(na.address, "na.survev.io:443");
    }

    #[test]
    fn test_local_region_seeded_in_development() {
        let config =
            ConfigLoader::load_from_str(Environment::Development, "{ gameServer: { port: 9001 } }").unwrap();
        let local = &config.regions["local"];
        assert_eq!(local.address, "127.0.0.1:9001");
        assert_eq!(local.l10n, "index-local");

        let prod =
            ConfigLoader::load_from_str(Environment::Production, "{ gameServer: { port: 9001 } }").unwrap();
        assert!(!prod.regions.contains_key("local"));
    }

    #[test]
    fn test_save_preserves_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "{ secrets: { SURVEV_API_KEY: 'key' }, customKey: { nested: [1, 2] }, gameTps: 100 }",
        );

        let mut patch = PartialConfig::new();
        patch.insert("gameTps", json!(128));
        ConfigLoader::try_save(dir.path(), &patch).unwrap();

        let persisted = read_config(&dir);
        assert_eq!(persisted.get_path(&["gameTps"]), Some(&json!(128)));
        assert_eq!(persisted.get_path(&["secrets", "SURVEV_API_KEY"]), Some(&json!("key")));
        assert_eq!(persisted.get_path(&["customKey", "nested"]), Some(&json!([1, 2])));
    }

    #[test]
    fn test_save_does_not_persist_derived_fields() {
        let dir = TempDir::new().unwrap();
        ConfigLoader::resolve(Environment::Development, dir.path()).unwrap();

        let mut patch = PartialConfig::new();
        patch.insert("clientTheme", json!("halloween"));
        ConfigLoader::save(dir.path(), &patch);

        let persisted = read_config(&dir);
        assert!(persisted.get_path(&["oauthRedirectURI"]).is_none());
        assert!(persisted.get_path(&["regions"]).is_none());
        assert_eq!(persisted.get_path(&["clientTheme"]), Some(&json!("halloween")));

        let config = ConfigLoader::resolve(Environment::Development, dir.path()).unwrap();
        assert_eq!(config.client_theme, "halloween");
    }

    #[test]
    fn test_save_without_file_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let mut patch = PartialConfig::new();
        patch.insert("gameTps", json!(128));

        assert!(ConfigLoader::try_save(dir.path(), &patch).is_err());
        // best-effort form must not panic or create the file
        ConfigLoader::save(dir.path(), &patch);
        assert!(!ConfigLoader::config_path(dir.path()).exists());
    }

    #[test]
    fn test_save_with_corrupt_file_leaves_it_unchanged() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "{ broken");

        let mut patch = PartialConfig::new();
        patch.insert("gameTps", json!(128));
        ConfigLoader::save(dir.path(), &patch);

        assert_eq!(
            fs::read_to_string(ConfigLoader::config_path(dir.path())).unwrap(),
            "{ broken"
        );
    }

    #[test]
    fn test_concurrent_saves_leave_a_complete_file() {
        let dir = TempDir::new().unwrap();
        ConfigLoader::resolve(Environment::Production, dir.path()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let base_dir = dir.path().to_path_buf();
                std::thread::spawn(move || {
                    let mut patch = PartialConfig::new();
                    patch.insert(format!("writer{}", i), json!("x".repeat(4096)));
                    for _ in 0..10 {
                        ConfigLoader::try_save(&base_dir, &patch).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // last writer wins, but the file is always one whole write
        let persisted = read_config(&dir);
        assert!(persisted.get_path(&["secrets", "SURVEV_API_KEY"]).is_some());
        assert!((0..8).any(|i| {
            let key = format!("writer{}", i);
            persisted.get_path(&[key.as_str()]).is_some()
        }));

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(CONFIG_FILE_NAME)]);
    }
}
