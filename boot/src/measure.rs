//! Image verification: hash what was copied in, compare against the
//! trusted digest.
//!
//! Grounded on `start.c`'s `is_secure_boot`, which hashes the just-loaded
//! NORMAL image and compares it byte-for-byte against a baked-in expected
//! hash before letting the kernel run.

use hart::hash::{self, Digest32};

/// Hash `image` the same way BOOT's trusted reference was produced.
pub fn observed_hash(image: &[u8]) -> Digest32 {
    hash::measure(image)
}

/// Whether `observed` matches `trusted`, byte for byte.
pub fn matches_trusted(observed: &Digest32, trusted: &Digest32) -> bool {
    observed == trusted
}
