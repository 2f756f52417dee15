//! Salted hash generation and validation

use crate::codec::{self, DecodedToken};
use crate::config::SaltedHashConfig;
use crate::digest_state::DigestState;
use crate::registry::AlgorithmRegistry;
use crate::salt::{DEFAULT_SALT_LEN, Salt};
use crate::scheme::{SchemeTag, algorithm_for_scheme_tag_in, scheme_tag_for};
use crate::Result;
use std::io::Read;
use std::sync::Arc;

const READ_CHUNK_SIZE: usize = 8192;

/// Type state indicating no salt has been set
#[derive(Clone, Debug)]
pub struct NoSalt {
    len: usize,
}

/// Type state indicating salt has been set
#[derive(Clone, Debug)]
pub struct HasSalt(Salt);

/// Builder for [`SaltedHash`]
#[derive(Clone, Debug)]
pub struct SaltedHashBuilder<S> {
    algorithm: String,
    registry: Option<Arc<AlgorithmRegistry>>,
    salt: S,
}

impl<S> SaltedHashBuilder<S> {
    /// Hash algorithm name, `SHA-1` when not set
    #[must_use]
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Resolve algorithms against `registry` instead of the shared one
    #[must_use]
    pub fn registry(mut self, registry: Arc<AlgorithmRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }
}

impl SaltedHashBuilder<NoSalt> {
    /// Length of the generated salt, 4 bytes when not set
    #[must_use]
    pub fn salt_len(self, len: usize) -> Self {
        Self {
            salt: NoSalt { len },
            ..self
        }
    }

    /// Use a fixed salt instead of a generated one
    #[must_use]
    pub fn salt(self, salt: Salt) -> SaltedHashBuilder<HasSalt> {
        SaltedHashBuilder {
            algorithm: self.algorithm,
            registry: self.registry,
            salt: HasSalt(salt),
        }
    }

    /// Build with a freshly generated salt
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if the algorithm is unknown.
    pub fn build(self) -> Result<SaltedHash> {
        let salt = Salt::generate(self.salt.len);
        assemble(&self.algorithm, self.registry, salt)
    }
}

impl SaltedHashBuilder<HasSalt> {
    /// Build with the fixed salt
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if the algorithm is unknown.
    pub fn build(self) -> Result<SaltedHash> {
        let HasSalt(salt) = self.salt;
        assemble(&self.algorithm, self.registry, salt)
    }
}

fn assemble(
    algorithm: &str,
    registry: Option<Arc<AlgorithmRegistry>>,
    salt: Salt,
) -> Result<SaltedHash> {
    let registry = registry.unwrap_or_else(|| Arc::clone(AlgorithmRegistry::shared()));
    let state = DigestState::with_registry(&registry, algorithm)?;
    let scheme = scheme_tag_for(state.algorithm())?;

    tracing::debug!(
        "Salted hash created: algorithm={}, scheme={scheme}, salt_len={}",
        state.algorithm(),
        salt.len()
    );

    Ok(SaltedHash {
        scheme,
        salt,
        state,
    })
}

/// Salted digest of accumulated clear text
///
/// The algorithm and salt are fixed at construction. Input is added with
/// [`SaltedHash::add`] and every call to [`SaltedHash::generate`] produces a
/// token for everything added so far without consuming it.
#[derive(Clone, Debug)]
pub struct SaltedHash {
    scheme: SchemeTag,
    salt: Salt,
    state: DigestState,
}

impl SaltedHash {
    /// Start building an instance
    #[must_use]
    pub fn builder() -> SaltedHashBuilder<NoSalt> {
        SaltedHashBuilder {
            algorithm: "SHA-1".to_string(),
            registry: None,
            salt: NoSalt {
                len: DEFAULT_SALT_LEN,
            },
        }
    }

    /// Instance for `algorithm` with a generated 4-byte salt
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if the algorithm is unknown.
    pub fn new(algorithm: &str) -> Result<Self> {
        Self::builder().algorithm(algorithm).build()
    }

    /// Instance described by `config`
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` for an unknown algorithm
    /// and `SaltedHashError::MalformedSalt` for a bad `HEX{...}` salt.
    pub fn from_config(config: &SaltedHashConfig) -> Result<Self> {
        let builder = Self::builder().algorithm(config.algorithm.as_str());
        match &config.salt {
            Some(salt) => builder.salt(Salt::parse(salt)?).build(),
            None => builder.salt_len(config.salt_len).build(),
        }
    }

    /// Append clear text
    pub fn add(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.state.update(data.as_ref());
        self
    }

    /// Append several chunks in order
    pub fn add_all<I, B>(&mut self, chunks: I) -> &mut Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        self.state.append(chunks);
        self
    }

    /// Append everything `reader` yields, returning the number of bytes read
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::Io` if reading fails. Bytes read before the
    /// failure stay in the accumulator.
    pub fn add_reader<R: Read>(&mut self, mut reader: R) -> Result<u64> {
        let mut buf = [0u8; READ_CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    self.state.update(&buf[..n]);
                    total += n as u64;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(total)
    }

    /// Forget all added clear text, keeping algorithm and salt
    pub fn clear(&mut self) -> &mut Self {
        self.state.reset();
        self
    }

    /// Token `{SCHEME}base64(digest ++ salt)` for the input added so far
    #[must_use]
    pub fn generate(&self) -> String {
        tracing::trace!(
            "Generating {} token over {} bytes",
            self.scheme,
            self.state.total_bytes()
        );
        codec::generate(&self.state, &self.salt, &self.scheme)
    }

    /// Base64 payload of [`SaltedHash::generate`] without the scheme tag
    #[must_use]
    pub fn hash_only(&self) -> String {
        codec::encode_payload(&self.state, &self.salt)
    }

    /// Salt in use
    #[must_use]
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Raw salt bytes
    #[must_use]
    pub fn salt_bin(&self) -> &[u8] {
        self.salt.as_bytes()
    }

    /// Salt as lowercase hex
    #[must_use]
    pub fn salt_hex(&self) -> String {
        self.salt.to_hex()
    }

    /// Canonical algorithm name
    #[must_use]
    pub fn algorithm(&self) -> &str {
        self.state.algorithm()
    }

    /// Scheme tag written into tokens
    #[must_use]
    pub fn scheme(&self) -> &SchemeTag {
        &self.scheme
    }

    /// Check `clear_text` against `token`, assuming a 4-byte salt
    ///
    /// A wrong clear text yields `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the token itself is unusable; see
    /// [`SaltedHash::validate_with`].
    pub fn validate(token: &str, clear_text: impl AsRef<[u8]>) -> Result<bool> {
        Self::validate_with_salt_len(token, clear_text, DEFAULT_SALT_LEN)
    }

    /// Check `clear_text` against `token` whose salt is `salt_len` bytes long
    ///
    /// # Errors
    ///
    /// See [`SaltedHash::validate_with`].
    pub fn validate_with_salt_len(
        token: &str,
        clear_text: impl AsRef<[u8]>,
        salt_len: usize,
    ) -> Result<bool> {
        Self::validate_with(AlgorithmRegistry::shared(), token, clear_text, salt_len)
    }

    /// Check `clear_text` against `token`, resolving the scheme in `registry`
    ///
    /// The algorithm is taken from the token's scheme tag. The token is
    /// regenerated from the clear text and the recovered salt and compared
    /// for exact equality.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` if the token has no `{...}` region, no payload, or
    ///   the payload is not base64
    /// - `MalformedScheme` / `UnsupportedAlgorithm` if the tag cannot be
    ///   mapped to a registered algorithm
    /// - `TruncatedToken` if the payload is shorter than `salt_len`
    pub fn validate_with(
        registry: &Arc<AlgorithmRegistry>,
        token: &str,
        clear_text: impl AsRef<[u8]>,
        salt_len: usize,
    ) -> Result<bool> {
        let DecodedToken { scheme, payload } = codec::decode(token).inspect_err(|e| {
            tracing::debug!("Rejected token: {e}");
        })?;
        let algorithm = algorithm_for_scheme_tag_in(registry, &scheme.to_ascii_uppercase())?;
        let salt = codec::extract_salt(&payload, salt_len)?;

        let mut candidate = Self::builder()
            .algorithm(algorithm)
            .registry(Arc::clone(registry))
            .salt(salt)
            .build()?;
        candidate.add(clear_text);

        let matched = candidate.generate() == token;
        tracing::debug!("Validated {} token: matched={matched}", candidate.scheme());
        Ok(matched)
    }
}
