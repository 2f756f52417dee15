//! Hash primitive registry
//!
//! Algorithms are selected by name at runtime. Each registered name maps to a
//! constructor producing a boxed [`HashPrimitive`]; new algorithms are added
//! by registering another constructor.

use crate::scheme::scheme_tag_for;
use crate::{Result, SaltedHashError};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Capability set every hash primitive must offer: incremental input, deep
/// copy of the internal state, and finalization to raw bytes
pub trait HashPrimitive: Send + Sync {
    /// Feed more input
    fn update(&mut self, data: &[u8]);

    /// Copy the current internal state
    fn box_clone(&self) -> Box<dyn HashPrimitive>;

    /// Consume the primitive and return the digest bytes
    fn finalize_boxed(self: Box<Self>) -> Vec<u8>;

    /// Digest length in bytes
    fn output_size(&self) -> usize;
}

impl<D> HashPrimitive for D
where
    D: digest::Digest + Clone + Send + Sync + 'static,
{
    fn update(&mut self, data: &[u8]) {
        digest::Digest::update(self, data);
    }

    fn box_clone(&self) -> Box<dyn HashPrimitive> {
        Box::new(self.clone())
    }

    fn finalize_boxed(self: Box<Self>) -> Vec<u8> {
        digest::Digest::finalize(*self).to_vec()
    }

    fn output_size(&self) -> usize {
        <D as digest::Digest>::output_size()
    }
}

impl Clone for Box<dyn HashPrimitive> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Constructor for a fresh hash primitive
pub type PrimitiveFactory = fn() -> Box<dyn HashPrimitive>;

/// Constructor for any RustCrypto `Digest` implementation
#[must_use]
pub fn digest_factory<D>() -> Box<dyn HashPrimitive>
where
    D: digest::Digest + Clone + Send + Sync + 'static,
{
    Box::new(D::new())
}

#[derive(Clone)]
struct RegisteredAlgorithm {
    canonical: String,
    factory: PrimitiveFactory,
}

static SHARED: Lazy<Arc<AlgorithmRegistry>> =
    Lazy::new(|| Arc::new(AlgorithmRegistry::with_defaults()));

/// Maps algorithm names to hash primitive constructors
///
/// Lookups ignore ASCII case and `-`, so `sha256`, `SHA-256` and `SHA256`
/// all resolve to the same entry. The name given at registration is the
/// canonical one returned by [`AlgorithmRegistry::resolve`].
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    entries: BTreeMap<String, RegisteredAlgorithm>,
}

impl AlgorithmRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in algorithms
    ///
    /// `MD5`, `SHA-1`, the SHA-2 family, the SHA-3 family, `BLAKE2B-512` and
    /// `BLAKE2S-256`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: [(&str, PrimitiveFactory); 12] = [
            ("MD5", digest_factory::<md5::Md5>),
            ("SHA-1", digest_factory::<sha1::Sha1>),
            ("SHA-224", digest_factory::<sha2::Sha224>),
            ("SHA-256", digest_factory::<sha2::Sha256>),
            ("SHA-384", digest_factory::<sha2::Sha384>),
            ("SHA-512", digest_factory::<sha2::Sha512>),
            ("SHA3-224", digest_factory::<sha3::Sha3_224>),
            ("SHA3-256", digest_factory::<sha3::Sha3_256>),
            ("SHA3-384", digest_factory::<sha3::Sha3_384>),
            ("SHA3-512", digest_factory::<sha3::Sha3_512>),
            ("BLAKE2B-512", digest_factory::<blake2::Blake2b512>),
            ("BLAKE2S-256", digest_factory::<blake2::Blake2s256>),
        ];
        for (name, factory) in defaults {
            registry.entries.insert(
                lookup_key(name),
                RegisteredAlgorithm {
                    canonical: name.to_string(),
                    factory,
                },
            );
        }
        registry
    }

    /// Registry shared by every instance that does not bring its own
    #[must_use]
    pub fn shared() -> &'static Arc<AlgorithmRegistry> {
        Lazy::force(&SHARED)
    }

    /// Register an algorithm
    ///
    /// Registering the same canonical name again replaces its constructor.
    /// Lookups ignore case and `-`, so a differently spelled name with the
    /// same lookup key (`SHA-3256` after `SHA3-256`) is rejected rather than
    /// silently renaming the entry.
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if the name cannot be
    /// expressed as a scheme tag, and `SaltedHashError::AlgorithmConflict` if
    /// another canonical name already owns its lookup key.
    pub fn register(&mut self, name: &str, factory: PrimitiveFactory) -> Result<&mut Self> {
        scheme_tag_for(name)?;
        let key = lookup_key(name);

        match self.entries.get_mut(&key) {
            Some(existing) if existing.canonical != name => {
                tracing::warn!(
                    "Refusing to register {name}: lookup key taken by {}",
                    existing.canonical
                );
                return Err(SaltedHashError::AlgorithmConflict {
                    existing: existing.canonical.clone(),
                    requested: name.to_string(),
                });
            }
            Some(existing) => {
                existing.factory = factory;
                tracing::debug!("Algorithm {name} constructor replaced");
            }
            None => {
                self.entries.insert(
                    key,
                    RegisteredAlgorithm {
                        canonical: name.to_string(),
                        factory,
                    },
                );
                tracing::debug!("Algorithm {name} registered");
            }
        }
        Ok(self)
    }

    /// Canonical name for `name`, if registered
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&lookup_key(name))
            .map(|entry| entry.canonical.as_str())
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&lookup_key(name))
    }

    /// Canonical names of all registered algorithms
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.canonical.as_str())
    }

    /// Build a fresh primitive for `name`
    ///
    /// Returns the canonical name, the constructor and the new primitive.
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if `name` is not registered.
    pub(crate) fn instantiate(
        &self,
        name: &str,
    ) -> Result<(String, PrimitiveFactory, Box<dyn HashPrimitive>)> {
        let entry = self
            .entries
            .get(&lookup_key(name))
            .ok_or_else(|| SaltedHashError::unsupported_algorithm(name))?;
        Ok((entry.canonical.clone(), entry.factory, (entry.factory)()))
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.algorithms()).finish()
    }
}

fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
