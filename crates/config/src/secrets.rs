//! First-run secret generation

use crate::codec::PartialConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore as _;
use serde_json::json;

/// Random bytes behind the API key
pub const API_KEY_BYTES: usize = 64;
/// Random bytes behind the loadout and IP secrets
pub const AUX_SECRET_BYTES: usize = 32;

/// Generate `len` random bytes encoded as standard base64
pub fn generate_secret(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Override written on first run, holding freshly generated secrets
pub fn initial_override() -> PartialConfig {
    let mut config = PartialConfig::new();
    config.insert(
        "secrets",
        json!({
            "SURVEV_API_KEY": generate_secret(API_KEY_BYTES),
            "SURVEV_LOADOUT_SECRET": generate_secret(AUX_SECRET_BYTES),
            "SURVEV_IP_SECRET": generate_secret(AUX_SECRET_BYTES),
        }),
    );
    config
}
