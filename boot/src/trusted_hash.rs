//! The digest BOOT trusts the NORMAL kernel image to hash to.
//!
//! Normally baked into the bootloader binary at build time by a separate
//! signing step. No such signing pipeline exists here, so this constant is
//! left as an explicit hook rather than a guessed value: a real deployment
//! overwrites it (or builds `boot` with a `build.rs` that injects it) with
//! the digest of its actual signed kernel image.

use hart::hash::Digest32;

pub const TRUSTED_KERNEL_HASH: Digest32 = [0u8; 32];
