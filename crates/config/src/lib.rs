//! Configuration management for the Survev server
//!
//! Resolves a single immutable configuration by layering the user's override
//! file over built-in defaults, generating secrets on first run and filling in
//! fields derived from the merged values.

pub mod codec;
pub mod derived;
pub mod loader;
pub mod merge;
pub mod schema;
pub mod secrets;

pub use codec::{PartialConfig, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use merge::deep_merge;
pub use schema::*;
