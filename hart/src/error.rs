//! A small, shared halt-error type.
//!
//! BOOT, TEM, and ULT are three independent subsystems, each with their own
//! few ways to fail irrecoverably; a single flat enum collected here avoids
//! each one inventing its own, while staying just as unceremonious about
//! what happens next as a bare `.expect("...")` would be: whoever holds a
//! `HaltError` logs it and halts.

use ::core::fmt;

/// A condition severe enough that the calling subsystem cannot continue.
///
/// None of BOOT, TEM, or ULT attempt recovery below this point: the caller
/// logs the variant and halts (BOOT) or re-raises it as a fault into the
/// next privilege level up (TEM).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HaltError {
    /// An ELF header, program header, or section header failed validation.
    MalformedImage,
    /// A measured image's digest did not match its expected value.
    HashMismatch,
    /// A PMP region descriptor could not be encoded (bad alignment, bad
    /// size, or a TOR/NAPOT combination outside the platform's constraints).
    InvalidRegion,
    /// A CSR number has no entry in the shadow register file.
    UnknownCsr,
    /// A privileged instruction's operands were decoded as malformed.
    InvalidInstruction,
    /// The calling mode lacked the minimum privilege a shadow register
    /// demands.
    PrivilegeViolation,
    /// The thread table has no free slot left for `ult_create`.
    ThreadTableFull,
    /// A thread identifier did not name a live thread.
    InvalidThread,
}

impl HaltError {
    /// A short, fixed string suitable for the debug console.
    pub const fn message(self) -> &'static str {
        match self {
            HaltError::MalformedImage => "malformed image",
            HaltError::HashMismatch => "hash mismatch",
            HaltError::InvalidRegion => "invalid PMP region",
            HaltError::UnknownCsr => "unknown CSR",
            HaltError::InvalidInstruction => "invalid privileged instruction",
            HaltError::PrivilegeViolation => "privilege violation",
            HaltError::ThreadTableFull => "thread table full",
            HaltError::InvalidThread => "invalid thread id",
        }
    }
}

impl fmt::Display for HaltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_message() {
        let variants = [
            HaltError::MalformedImage,
            HaltError::HashMismatch,
            HaltError::InvalidRegion,
            HaltError::UnknownCsr,
            HaltError::InvalidInstruction,
            HaltError::PrivilegeViolation,
            HaltError::ThreadTableFull,
            HaltError::InvalidThread,
        ];
        for v in variants {
            assert!(!v.message().is_empty());
        }
    }
}
