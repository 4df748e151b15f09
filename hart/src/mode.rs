//! The three RISC-V privilege levels, ordered the way the shadow CSR file's
//! privilege rule needs them ordered.

/// A RISC-V privilege level.
///
/// Numeric values and ordering match `trap-and-emulate.c`'s `U_MODE`/
/// `S_MODE`/`M_MODE` defines (`0`/`1`/`2`), which the privilege check
/// (`vm_state.priviledge_mode >= src->mode`) relies on directly.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Mode {
    User = 0,
    Supervisor = 1,
    Machine = 2,
}

impl Mode {
    /// One level up (`ECALL`'s effect): `User -> Supervisor -> Machine`.
    ///
    /// Returns `None` from `Machine`; there is no higher mode to raise into,
    /// so an `ECALL` already in Machine mode is a no-op return rather than
    /// a fault.
    pub const fn raised(self) -> Option<Self> {
        match self {
            Mode::User => Some(Mode::Supervisor),
            Mode::Supervisor => Some(Mode::Machine),
            Mode::Machine => None,
        }
    }

    /// Decode a 2-bit `xPP` previous-privilege field into a `Mode`.
    ///
    /// `SRET` only ever encodes `SPP` as 1 bit (`0` or `1`); `MRET` encodes
    /// `MPP` as 2 bits (`0`, `1`, or `3` — `2` is reserved). `None` signals
    /// a reserved encoding.
    pub const fn from_pp(bits: u64) -> Option<Self> {
        match bits {
            0 => Some(Mode::User),
            1 => Some(Mode::Supervisor),
            3 => Some(Mode::Machine),
            _ => None,
        }
    }
}
