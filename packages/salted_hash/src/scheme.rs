//! Scheme tag naming
//!
//! Maps algorithm names such as `SHA-256` to the bracketed tag embedded in a
//! token (`{SSHA256}`) and back. `SHA-1` is special-cased to the bare `{SSHA}`
//! used by LDAP servers.

use crate::registry::AlgorithmRegistry;
use crate::{Result, SaltedHashError};

/// A bracketed scheme tag such as `{SSHA}` or `{SSHA256}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemeTag(String);

impl SchemeTag {
    /// The full tag including braces, e.g. `{SSHA}`
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag without braces, e.g. `SSHA`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0[1..self.0.len() - 1]
    }
}

impl std::fmt::Display for SchemeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemeTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the scheme tag for an algorithm name
///
/// The name is upper-cased, a `-` that separates a name from a trailing run of
/// digits is dropped, `S` is prepended and the result is wrapped in braces.
///
/// The mapping is purely textual, so `algorithm` should be a canonical name as
/// returned by [`AlgorithmRegistry::resolve`]. `SHA1` yields `{SSHA1}` here,
/// not `{SSHA}`; use [`scheme_tag_for_in`] for names spelled by a user.
///
/// # Errors
///
/// Returns `SaltedHashError::UnsupportedAlgorithm` if the name is empty or is
/// not ASCII alphanumeric with at most one such `-` separator.
pub fn scheme_tag_for(algorithm: &str) -> Result<SchemeTag> {
    let upper = algorithm.to_ascii_uppercase();

    let collapsed = match upper.split_once('-') {
        Some(("SHA", "1")) => "SHA".to_string(),
        Some((name, digits))
            if is_alphanumeric(name) && !digits.is_empty() && is_digits(digits) =>
        {
            format!("{name}{digits}")
        }
        Some(_) => return Err(SaltedHashError::unsupported_algorithm(algorithm)),
        None if is_alphanumeric(&upper) => upper.clone(),
        None => return Err(SaltedHashError::unsupported_algorithm(algorithm)),
    };

    Ok(SchemeTag(format!("{{S{collapsed}}}")))
}

/// Derive the scheme tag for any spelling of a registered algorithm
///
/// `algorithm` is resolved to its canonical name in `registry` first, so
/// `sha1`, `SHA1` and `SHA-1` all yield `{SSHA}`.
///
/// # Errors
///
/// Returns `SaltedHashError::UnsupportedAlgorithm` if `registry` does not
/// know the name.
pub fn scheme_tag_for_in(registry: &AlgorithmRegistry, algorithm: &str) -> Result<SchemeTag> {
    let canonical = registry
        .resolve(algorithm)
        .ok_or_else(|| SaltedHashError::unsupported_algorithm(algorithm))?;
    scheme_tag_for(canonical)
}

/// Recover the algorithm name for a scheme tag using the shared registry
///
/// # Errors
///
/// Returns `SaltedHashError::MalformedScheme` if the tag lacks braces or its
/// leading `S`, and `SaltedHashError::UnsupportedAlgorithm` if it names no
/// registered algorithm.
pub fn algorithm_for_scheme_tag(tag: &str) -> Result<String> {
    algorithm_for_scheme_tag_in(AlgorithmRegistry::shared(), tag)
}

/// Recover the algorithm name for a scheme tag using a specific registry
///
/// # Errors
///
/// See [`algorithm_for_scheme_tag`].
pub fn algorithm_for_scheme_tag_in(registry: &AlgorithmRegistry, tag: &str) -> Result<String> {
    let inner = tag
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| SaltedHashError::malformed_scheme(format!("missing braces in {tag:?}")))?;

    let body = inner
        .strip_prefix('S')
        .ok_or_else(|| SaltedHashError::malformed_scheme(format!("missing leading S in {tag:?}")))?;

    if body.is_empty() || !is_alphanumeric(body) {
        return Err(SaltedHashError::malformed_scheme(format!(
            "invalid characters in {tag:?}"
        )));
    }

    let candidate = split_name_digits(body);
    registry
        .resolve(&candidate)
        .map(str::to_string)
        .ok_or_else(|| SaltedHashError::unsupported_algorithm(candidate))
}

// `SHA` -> `SHA-1`, `SHA256` -> `SHA-256`; anything else is returned as is
fn split_name_digits(body: &str) -> String {
    if body == "SHA" {
        return "SHA-1".to_string();
    }

    let split = body.find(|c: char| c.is_ascii_digit()).unwrap_or(body.len());
    let (name, digits) = body.split_at(split);
    if !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphabetic())
        && !digits.is_empty()
        && is_digits(digits)
    {
        format!("{name}-{digits}")
    } else {
        body.to_string()
    }
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}
