//! Guest-visible faults: conditions that terminate the trapped guest and
//! reinitialize the monitor, but do not halt the host.
//!
//! Grounded on `trap-and-emulate.c`'s many `setkilled(p); trap_and_emulate_init();`
//! pairs (in `emulate_csrr`, `emulate_csrw`, and the decode ladder's
//! `else` arms); collected into a named enum per SPEC_FULL §5 instead of
//! being implicit in "whichever branch called `setkilled`."

/// A condition that kills the currently-trapped guest process.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fault {
    /// `guest_mode < slot.minimum_mode` on a `CSRR`/`CSRW`.
    PrivilegeViolation,
    /// The `SYSTEM` opcode decoded to no known privileged instruction
    /// (the decode ladder's final `else` arms).
    UnrecognizedInstruction,
    /// An attempt to write `0` to `mvendorid`, which would violate the
    /// "`mvendorid.value == 0x637365353336` at all times" invariant.
    VendorIdZeroWrite,
    /// `rs1 != x0` on a `CSRR`, or `rd != x0` on a `CSRW`.
    MalformedOperands,
}
