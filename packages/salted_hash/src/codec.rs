//! Token encoding and decoding
//!
//! A token is `{SCHEME}` followed by the standard base64 encoding of the
//! digest bytes with the raw salt bytes appended.

use crate::digest_state::DigestState;
use crate::salt::Salt;
use crate::scheme::SchemeTag;
use crate::{Result, SaltedHashError};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Base64 payload for `state` salted with `salt`, without the scheme prefix
///
/// The salt is appended to a copy of the state only.
#[must_use]
pub fn encode_payload(state: &DigestState, salt: &Salt) -> String {
    let digest = state.finalize_clone_with(salt.as_bytes());

    let mut raw = Vec::with_capacity(digest.len() + salt.len());
    raw.extend_from_slice(&digest);
    raw.extend_from_slice(salt.as_bytes());

    STANDARD.encode(raw)
}

/// Build the full token `{SCHEME}base64(digest ++ salt)`
#[must_use]
pub fn generate(state: &DigestState, salt: &Salt, scheme: &SchemeTag) -> String {
    let payload = encode_payload(state, salt);
    let mut token = String::with_capacity(scheme.as_str().len() + payload.len());
    token.push_str(scheme.as_str());
    token.push_str(&payload);
    token
}

/// A token split into its scheme tag and base64 payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedToken {
    /// Scheme tag including braces, e.g. `{SSHA}`
    pub scheme: String,
    /// Base64 text following the scheme tag
    pub payload: String,
}

impl DecodedToken {
    /// Decoded payload bytes (digest followed by salt)
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::MalformedToken` if the payload is not valid base64.
    pub fn payload_bytes(&self) -> Result<Vec<u8>> {
        decode_payload(&self.payload)
    }

    /// Trailing `salt_len` bytes of the payload
    ///
    /// # Errors
    ///
    /// See [`extract_salt`].
    pub fn salt(&self, salt_len: usize) -> Result<Salt> {
        extract_salt(&self.payload, salt_len)
    }
}

/// Split a token into scheme tag and payload
///
/// The scheme tag runs from the first `{` to the next `}`; the payload is
/// everything after it up to the first whitespace.
///
/// # Errors
///
/// Returns `SaltedHashError::MalformedToken` if there is no `{...}` region or
/// nothing follows it.
pub fn decode(token: &str) -> Result<DecodedToken> {
    let open = token
        .find('{')
        .ok_or_else(|| SaltedHashError::malformed_token("missing '{' in token"))?;
    let close = token[open..]
        .find('}')
        .map(|offset| open + offset)
        .ok_or_else(|| SaltedHashError::malformed_token("missing '}' in token"))?;

    let rest = &token[close + 1..];
    let payload = rest.split(char::is_whitespace).next().unwrap_or_default();
    if payload.is_empty() {
        return Err(SaltedHashError::malformed_token("no payload after scheme tag"));
    }

    Ok(DecodedToken {
        scheme: token[open..=close].to_string(),
        payload: payload.to_string(),
    })
}

/// Recover the salt from a base64 payload
///
/// # Errors
///
/// Returns `SaltedHashError::MalformedToken` if the payload is not valid
/// base64 and `SaltedHashError::TruncatedToken` if it decodes to fewer than
/// `salt_len` bytes.
pub fn extract_salt(payload: &str, salt_len: usize) -> Result<Salt> {
    let raw = decode_payload(payload)?;
    if raw.len() < salt_len {
        return Err(SaltedHashError::TruncatedToken {
            expected: salt_len,
            actual: raw.len(),
        });
    }
    Ok(Salt::from_bytes(raw[raw.len() - salt_len..].to_vec()))
}

fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(payload)
        .map_err(|e| SaltedHashError::malformed_token(format!("invalid base64 payload: {e}")))
}
