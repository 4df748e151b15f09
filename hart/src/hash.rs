//! Incremental SHA-256, used by BOOT to measure a loaded image before
//! comparing it against its expected digest.
//!
//! Wraps the `sha2` crate with `default-features = false, features =
//! ["force-soft"]`: a `no_std` environment needs a software SHA-256
//! implementation with no reliance on target-specific hardware
//! acceleration or an allocator, so this wraps `sha2` directly rather than
//! hand-rolling the compression function.

use sha2::{Digest, Sha256};

/// The output width of SHA-256, in bytes.
pub const DIGEST_LEN: usize = 32;

/// A SHA-256 digest.
pub type Digest32 = [u8; DIGEST_LEN];

/// An incremental SHA-256 hasher over image bytes fed in arbitrarily-sized
/// chunks, so BOOT can hash a block device's contents as it copies them
/// rather than needing the whole image resident at once.
pub struct Measurement {
    inner: Sha256,
}

impl Measurement {
    pub fn new() -> Self {
        Self { inner: Sha256::new() }
    }

    /// Feed the next chunk of image bytes into the running digest.
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    /// Finalize and return the digest.
    pub fn finish(self) -> Digest32 {
        self.inner.finalize().into()
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash `image` in one call; a convenience for callers that already hold
/// the full image in memory (as BOOT does once the copy loop completes).
pub fn measure(image: &[u8]) -> Digest32 {
    let mut m = Measurement::new();
    m.update(image);
    m.finish()
}
