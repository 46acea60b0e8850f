//! Checksum verifier entry point.
//!
//! # Purpose
//!
//! Verifies mirrored artifacts against their published checksums.
//!
//! # Examples
//!
//! ```text
//! verify --mirror releases-eu
//! ```

fn main() {
    println!("verify");
}
