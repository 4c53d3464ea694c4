//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use types::{Environment, GameMode, ProcessMode, ProxyDescriptor, Region, TeamMode};

/// Main configuration structure
///
/// Field names on the wire match the override file keys (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API server listen address
    pub api_server: ApiServerConfig,
    /// Game server listen address and upstream API
    pub game_server: GameServerConfig,
    /// Dev asset server address
    pub vite: ViteConfig,
    /// Region id to region descriptor
    pub regions: BTreeMap<String, Region>,
    /// Hostname to available login providers
    pub proxies: BTreeMap<String, ProxyDescriptor>,
    /// Playable modes
    pub modes: Vec<GameMode>,
    pub client_theme: String,
    /// Game simulation ticks per second
    pub game_tps: u32,
    /// Network sync ticks per second
    pub net_sync_tps: u32,
    pub process_mode: ProcessMode,
    /// Logging toggles
    pub logging: LoggingConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Where the OAuth provider sends users back to
    #[serde(rename = "oauthRedirectURI")]
    pub oauth_redirect_uri: String,
    pub oauth_base_path: String,
    /// Shared secrets and third-party credentials
    pub secrets: Secrets,
    pub captcha_enabled: bool,
    pub caching_enabled: bool,
    pub rate_limits_enabled: bool,
    pub unique_in_game_names: bool,
    /// Debug capabilities
    pub debug: DebugConfig,
    /// Item slot to default item
    pub default_items: BTreeMap<String, Value>,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiServerConfig {
    pub host: String,
    pub port: u16,
}

/// Game server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL the game server uses to reach the API server
    pub api_server_url: String,
    /// Region id this game server reports as
    pub this_region: String,
}

/// Dev asset server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViteConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Prefix log lines with a timestamp
    pub log_date: bool,
    pub info_logs: bool,
    pub debug_logs: bool,
    pub warn_logs: bool,
    pub error_logs: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub enabled: bool,
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

/// Secret values
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Secrets {
    /// Shared key for privileged API requests
    #[serde(rename = "SURVEV_API_KEY")]
    pub api_key: String,
    /// Signs player loadouts
    #[serde(rename = "SURVEV_LOADOUT_SECRET")]
    pub loadout_secret: String,
    /// Salts hashed player IPs
    #[serde(rename = "SURVEV_IP_SECRET")]
    pub ip_secret: String,
    #[serde(rename = "GOOGLE_CLIENT_ID")]
    pub google_client_id: String,
    #[serde(rename = "GOOGLE_SECRET_ID")]
    pub google_secret_id: String,
    #[serde(rename = "DISCORD_CLIENT_ID")]
    pub discord_client_id: String,
    #[serde(rename = "DISCORD_SECRET_ID")]
    pub discord_secret_id: String,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfig {
    pub spawn_mode: String,
    pub allow_bots: bool,
    pub allow_edit_msg: bool,
    pub allow_mock_account: bool,
}

impl Config {
    /// Build the complete default configuration for an environment
    pub fn defaults(env: Environment) -> Self {
        let is_dev = env.is_development();

        Self {
            api_server: ApiServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            game_server: GameServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8001,
                api_server_url: String::new(),
                this_region: "local".to_string(),
            },
            vite: ViteConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            regions: BTreeMap::new(),
            proxies: BTreeMap::new(),
            modes: vec![
                GameMode::new("main", TeamMode::Solo),
                GameMode::new("main", TeamMode::Duo),
                GameMode::new("main", TeamMode::Squad),
            ],
            client_theme: "main".to_string(),
            game_tps: 100,
            net_sync_tps: 33,
            process_mode: if is_dev {
                ProcessMode::Single
            } else {
                ProcessMode::Multi
            },
            logging: LoggingConfig {
                log_date: true,
                info_logs: true,
                debug_logs: is_dev,
                warn_logs: true,
                error_logs: true,
            },
            database: DatabaseConfig::default(),
            oauth_redirect_uri: String::new(),
            oauth_base_path: "/".to_string(),
            secrets: Secrets::default(),
            captcha_enabled: false,
            caching_enabled: false,
            rate_limits_enabled: env.is_production(),
            unique_in_game_names: true,
            debug: DebugConfig {
                spawn_mode: "default".to_string(),
                allow_bots: is_dev,
                allow_edit_msg: is_dev,
                allow_mock_account: is_dev,
            },
            default_items: BTreeMap::new(),
        }
    }

    /// Convert to a JSON tree for merging
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Extract from a fully merged JSON tree
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            user: "survev".to_string(),
            password: "survev".to_string(),
            database: "survev".to_string(),
            port: 5432,
        }
    }
}

impl Secrets {
    /// Google login needs both halves of the OAuth client
    pub fn google_login_enabled(&self) -> bool {
        !self.google_client_id.is_empty() && !self.google_secret_id.is_empty()
    }

    /// Discord login needs both halves of the OAuth client
    pub fn discord_login_enabled(&self) -> bool {
        !self.discord_client_id.is_empty() && !self.discord_secret_id.is_empty()
    }
}
