//! Game mode types

use serde::{Deserialize, Serialize};

/// Team size of a game mode
///
/// Encoded on the wire by its player count per team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamMode {
    Solo,
    Duo,
    Squad,
}

impl TeamMode {
    /// Players per team
    pub fn team_size(self) -> u8 {
        match self {
            TeamMode::Solo => 1,
            TeamMode::Duo => 2,
            TeamMode::Squad => 4,
        }
    }
}

impl From<TeamMode> for u8 {
    fn from(mode: TeamMode) -> Self {
        mode.team_size()
    }
}

impl TryFrom<u8> for TeamMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamMode::Solo),
            2 => Ok(TeamMode::Duo),
            4 => Ok(TeamMode::Squad),
            other => Err(format!("Invalid team mode: {}", other)),
        }
    }
}

/// A playable mode offered to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameMode {
    /// Map definition name
    pub map_name: String,
    /// Team size mode
    pub team_mode: TeamMode,
    /// Whether the mode can be queued for
    pub enabled: bool,
}

impl GameMode {
    pub fn new(map_name: impl Into<String>, team_mode: TeamMode) -> Self {
        Self {
            map_name: map_name.into(),
            team_mode,
            enabled: true,
        }
    }
}
