//! Shared types for the Survev server
//!
//! This crate contains the domain types and error taxonomy shared by the
//! configuration resolver and the services that consume it.

pub mod deployment;
pub mod error;
pub mod game;
pub mod region;

// Re-export commonly used types
pub use deployment::{Environment, ProcessMode};
pub use error::{ConfigError, Result, SurvevError};
pub use game::{GameMode, TeamMode};
pub use region::{ProxyDescriptor, Region, RegionStatus};
