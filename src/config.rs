//! Scheme parameters shared by the bank, spenders and merchants.

use std::fs;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::cryptographic_primitives::blind_signatures::rsa::MIN_KEY_BITS;

/// Slots per coin. A double spender escapes detection with probability `2^-ris_length`.
pub const DEFAULT_RIS_LENGTH: usize = 128;
pub const DEFAULT_KEY_BITS: usize = 2048;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Identity slots committed to by every coin
    pub ris_length: usize,
    /// Bank RSA modulus size
    pub key_bits: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        ProtocolConfig {
            ris_length: DEFAULT_RIS_LENGTH,
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

impl ProtocolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ris_length == 0 {
            return Err(ConfigError::Invalid("ris_length must be at least 1".to_owned()));
        }
        if self.key_bits < MIN_KEY_BITS || self.key_bits % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "key_bits must be even and at least {}, got {}",
                MIN_KEY_BITS, self.key_bits
            )));
        }
        Ok(())
    }

    /// Loads a JSON config; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: ProtocolConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}
