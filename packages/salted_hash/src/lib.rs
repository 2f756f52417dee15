//! RFC 3112 salted hashes (`{SSHA}`, `{SSHA256}`, `{SMD5}`, ...)
//!
//! A token is the scheme tag followed by the base64 encoding of the digest of
//! `clear_text ++ salt` with the raw salt appended:
//!
//! ```
//! use cryypt_salted_hash::{Salt, SaltedHash};
//!
//! # fn main() -> cryypt_salted_hash::Result<()> {
//! let mut hash = SaltedHash::builder()
//!     .algorithm("SHA-1")
//!     .salt(Salt::parse("HEX{6de2088b}")?)
//!     .build()?;
//! hash.add("testing123");
//!
//! let token = hash.generate();
//! assert!(token.starts_with("{SSHA}"));
//! assert!(SaltedHash::validate(&token, "testing123")?);
//! assert!(!SaltedHash::validate(&token, "Test123")?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod digest_state;
pub mod error;
pub mod registry;
pub mod salt;
pub mod salted_hash;
pub mod scheme;

// Re-export error types
pub use error::{Result, SaltedHashError};

pub use codec::{DecodedToken, decode, extract_salt};
pub use config::SaltedHashConfig;
pub use digest_state::DigestState;
pub use registry::{AlgorithmRegistry, HashPrimitive, PrimitiveFactory, digest_factory};
pub use salt::{DEFAULT_SALT_LEN, Salt, generate_salt};
pub use salted_hash::{HasSalt, NoSalt, SaltedHash, SaltedHashBuilder};
pub use scheme::{
    SchemeTag, algorithm_for_scheme_tag, algorithm_for_scheme_tag_in, scheme_tag_for,
    scheme_tag_for_in,
};
