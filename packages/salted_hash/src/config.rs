//! Salted hash configuration

use crate::salt::DEFAULT_SALT_LEN;
use serde::{Deserialize, Serialize};

/// Settings used to build a [`crate::SaltedHash`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltedHashConfig {
    /// Hash algorithm name, e.g. `SHA-1` or `SHA-256`
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Length of generated salts in bytes
    #[serde(default = "default_salt_len")]
    pub salt_len: usize,
    /// Fixed salt, raw or `HEX{...}`; a random one is generated when absent
    #[serde(default)]
    pub salt: Option<String>,
}

fn default_algorithm() -> String {
    "SHA-1".to_string()
}

fn default_salt_len() -> usize {
    DEFAULT_SALT_LEN
}

impl Default for SaltedHashConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            salt_len: default_salt_len(),
            salt: None,
        }
    }
}
