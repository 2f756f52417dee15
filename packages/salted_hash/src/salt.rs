//! Salt generation and parsing

use crate::{Result, SaltedHashError};
use rand::Rng;
use std::str::FromStr;

/// Salt length used when none is given, in raw bytes
pub const DEFAULT_SALT_LEN: usize = 4;

const HEX_PREFIX: &[u8] = b"HEX{";
const HEX_SUFFIX: &[u8] = b"}";

/// Raw salt bytes appended to the clear text before hashing
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Salt(Vec<u8>);

impl Salt {
    /// Generate `len` random salt bytes
    ///
    /// The high nibble of the first byte is never zero, matching the salts
    /// produced by existing `{SSHA}` writers.
    #[must_use]
    pub fn generate(len: usize) -> Self {
        let mut rng = rand::rng();
        let bytes = (0..len)
            .map(|i| {
                let high: u8 = if i == 0 {
                    rng.random_range(1..16)
                } else {
                    rng.random_range(0..16)
                };
                let low: u8 = rng.random_range(0..16);
                (high << 4) | low
            })
            .collect();
        Self(bytes)
    }

    /// Parse a salt given as raw bytes or as `HEX{...}`
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::MalformedSalt` if the `HEX{...}` body has an
    /// odd length or contains non-hex characters.
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self> {
        let input = input.as_ref();
        match hex_body(input) {
            Some(body) => hex::decode(body)
                .map(Self)
                .map_err(|e| SaltedHashError::malformed_salt(e.to_string())),
            None => Ok(Self(input.to_vec())),
        }
    }

    /// Wrap raw salt bytes
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw salt bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex form of the salt
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Salt length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the salt is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Generate a random salt of `len` bytes
#[must_use]
pub fn generate_salt(len: usize) -> Salt {
    Salt::generate(len)
}

fn hex_body(input: &[u8]) -> Option<&[u8]> {
    input.strip_prefix(HEX_PREFIX)?.strip_suffix(HEX_SUFFIX)
}

impl FromStr for Salt {
    type Err = SaltedHashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<u8>> for Salt {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Salt {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt(HEX{{{}}})", self.to_hex())
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
