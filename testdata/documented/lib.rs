//! Artifact checksum bookkeeping.
//!
//! # Purpose
//!
//! Tracks checksums of published artifacts so mirrors can verify copies.
//!
//! # Examples
//!
//! ```
//! let digest = checksums::digest(b"artifact");
//! ```

pub fn digest(bytes: &[u8]) -> u64 {
    bytes.iter().map(|b| *b as u64).sum()
}
