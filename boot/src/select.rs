//! The boot decision itself: verify NORMAL, fall back to RECOVERY on
//! mismatch.
//!
//! Hashes the NORMAL image and compares it to the trusted digest; on a
//! mismatch, RECOVERY is loaded unconditionally and the published
//! "expected"/"observed" pair stays the trusted digest and NORMAL's own
//! (mismatching) hash — RECOVERY's hash is never computed for this
//! purpose, so the record always shows what failed to verify rather than
//! re-deriving a fresh pair off the image that booted instead. Written as
//! a pure function over the two images' bytes so the decision is
//! unit-testable without a block device or CSR access.

use hart::hash::Digest32;

use crate::elf::ElfHeader;
use crate::measure;

/// Which image BOOT decided to run, and the header facts it read off it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadedImage {
    Normal,
    Recovery,
}

/// The outcome of [`decide`]: which image won, its ELF header facts, and
/// the two hashes an auditor (or the system-info table) would want to see.
#[derive(Clone, Copy, Debug)]
pub struct Decision {
    pub loaded: LoadedImage,
    pub entry: u64,
    pub load_addr: u64,
    pub size: u64,
    pub expected_hash: Digest32,
    pub observed_hash: Digest32,
}

/// Decide between `normal` and `recovery`, given the `trusted` digest
/// NORMAL is expected to hash to.
///
/// Both slices must be at least as long as their image's own
/// `ElfHeader::binary_size()` — callers size them off [`crate::addresses::MAX_IMAGE_LEN`]
/// before the real size is known.
pub fn decide(normal: &[u8], recovery: &[u8], trusted: Digest32) -> Decision {
    let normal_hdr = ElfHeader::new(normal);
    let normal_size = normal_hdr.binary_size() as usize;
    let observed = measure::observed_hash(&normal[..normal_size]);

    if measure::matches_trusted(&observed, &trusted) {
        return Decision {
            loaded: LoadedImage::Normal,
            entry: normal_hdr.entry_address(),
            load_addr: normal_hdr.load_address(),
            size: normal_hdr.binary_size(),
            expected_hash: trusted,
            observed_hash: observed,
        };
    }

    let recovery_hdr = ElfHeader::new(recovery);

    Decision {
        loaded: LoadedImage::Recovery,
        entry: recovery_hdr.entry_address(),
        load_addr: recovery_hdr.load_address(),
        size: recovery_hdr.binary_size(),
        expected_hash: trusted,
        observed_hash: observed,
    }
}
