//! Incremental digest state with non-destructive finalization

use crate::registry::{AlgorithmRegistry, HashPrimitive, PrimitiveFactory};
use crate::Result;

/// Accumulator bound to one hash algorithm
///
/// Input is appended incrementally. [`DigestState::finalize_clone`] digests a
/// copy of the state, so the live accumulator keeps going afterwards.
#[derive(Clone)]
pub struct DigestState {
    algorithm: String,
    factory: PrimitiveFactory,
    primitive: Box<dyn HashPrimitive>,
    total_bytes: u64,
}

impl DigestState {
    /// Bind to `algorithm` from the shared registry
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if the name is unknown.
    pub fn new(algorithm: &str) -> Result<Self> {
        Self::with_registry(AlgorithmRegistry::shared(), algorithm)
    }

    /// Bind to `algorithm` from a specific registry
    ///
    /// # Errors
    ///
    /// Returns `SaltedHashError::UnsupportedAlgorithm` if the name is unknown.
    pub fn with_registry(registry: &AlgorithmRegistry, algorithm: &str) -> Result<Self> {
        let (algorithm, factory, primitive) = registry.instantiate(algorithm)?;
        Ok(Self {
            algorithm,
            factory,
            primitive,
            total_bytes: 0,
        })
    }

    /// Append one chunk of input
    pub fn update(&mut self, data: &[u8]) {
        self.primitive.update(data);
        self.total_bytes += data.len() as u64;
    }

    /// Append several chunks in order, as if they were one concatenated input
    pub fn append<I, B>(&mut self, chunks: I)
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        for chunk in chunks {
            self.update(chunk.as_ref());
        }
    }

    /// Digest of everything appended so far, leaving the state untouched
    #[must_use]
    pub fn finalize_clone(&self) -> Vec<u8> {
        self.primitive.box_clone().finalize_boxed()
    }

    /// Digest of everything appended so far followed by `suffix`
    ///
    /// `suffix` only reaches the copy being finalized.
    #[must_use]
    pub fn finalize_clone_with(&self, suffix: &[u8]) -> Vec<u8> {
        let mut copy = self.primitive.box_clone();
        copy.update(suffix);
        copy.finalize_boxed()
    }

    /// Drop all accumulated input
    pub fn reset(&mut self) {
        self.primitive = (self.factory)();
        self.total_bytes = 0;
    }

    /// Canonical algorithm name
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Digest length in bytes
    #[must_use]
    pub fn output_size(&self) -> usize {
        self.primitive.output_size()
    }

    /// Number of bytes appended since creation or the last reset
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

impl std::fmt::Debug for DigestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestState")
            .field("algorithm", &self.algorithm)
            .field("total_bytes", &self.total_bytes)
            .finish_non_exhaustive()
    }
}
