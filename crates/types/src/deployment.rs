//! Deployment mode types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment the services are running in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production deployment
    Production,
    /// Local development
    Development,
}

impl Environment {
    /// Build from a production flag
    pub fn from_production(is_production: bool) -> Self {
        if is_production {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

/// How game instances are hosted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    /// Every game runs inside the server process
    Single,
    /// Games are spread across worker processes
    Multi,
}
