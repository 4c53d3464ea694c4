//! Region and login-proxy types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A deployable game server region
///
/// Fields missing from the override fall back to their empty defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Region {
    /// Whether clients must connect over TLS
    pub https: bool,
    /// `host:port` the game server listens on
    pub address: String,
    /// Localization bucket for the region name
    pub l10n: String,
}

impl Region {
    /// Region pointing at a game server on this machine
    pub fn local(game_server_port: u16) -> Self {
        Self {
            https: false,
            address: format!("127.0.0.1:{}", game_server_port),
            l10n: "index-local".to_string(),
        }
    }
}

/// Live metrics reported by a region's game server
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegionStatus {
    #[serde(default)]
    pub player_count: u32,
}

/// Login providers available when the site is served from a given hostname
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProxyDescriptor {
    #[serde(default)]
    pub google: bool,
    #[serde(default)]
    pub discord: bool,
    /// Mock account login (development only)
    #[serde(default)]
    pub mock: bool,
    /// Any other keys written for this hostname, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
