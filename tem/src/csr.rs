//! The shadow CSR file's register catalogue.
//!
//! One tagged enum plus metadata functions stands in for a struct of 36
//! named fields and a switch returning pointers into it: every named CSR
//! number this monitor recognizes, its slot index into the flat value
//! table, and its minimum guest privilege.

use hart::Mode;

/// Number of `pmpcfg` slots the shadow file tracks (`pmpcfg0..pmpcfg15`).
pub const PMPCFG_COUNT: u8 = 16;
/// Number of `pmpaddr` slots the shadow file tracks (`pmpaddr0..pmpaddr63`).
pub const PMPADDR_COUNT: u8 = 64;

const PMPCFG_BASE: u16 = 0x3A0;
const PMPADDR_BASE: u16 = 0x3B0;

/// One of every CSR the shadow file mirrors.
///
/// `PmpCfg`/`PmpAddr` carry the bank index (`0..16` / `0..64`) rather than
/// being 80 separate variants, collapsing what would otherwise be a
/// duplicated-range case arm into a single offset computation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CsrId {
    Ustatus,
    Uie,
    Utvec,
    Uscratch,
    Uepc,
    Ucause,
    Utval,
    Uip,
    Sstatus,
    Sedeleg,
    Sideleg,
    Sie,
    Stvec,
    Scounteren,
    Sscratch,
    Sepc,
    Scause,
    Stval,
    Sip,
    Satp,
    Mvendorid,
    Marchid,
    Mimpid,
    Mhartid,
    Mstatus,
    Misa,
    Medeleg,
    Mideleg,
    Mie,
    Mtvec,
    Mcounteren,
    Mscratch,
    Mepc,
    Mcause,
    Mtval,
    Mip,
    PmpCfg(u8),
    PmpAddr(u8),
}

/// Named scalar CSRs, in slot-index order. `PmpCfg`/`PmpAddr` slots follow
/// immediately after, indexed by bank number.
const NAMED: [CsrId; 36] = [
    CsrId::Ustatus,
    CsrId::Uie,
    CsrId::Utvec,
    CsrId::Uscratch,
    CsrId::Uepc,
    CsrId::Ucause,
    CsrId::Utval,
    CsrId::Uip,
    CsrId::Sstatus,
    CsrId::Sedeleg,
    CsrId::Sideleg,
    CsrId::Sie,
    CsrId::Stvec,
    CsrId::Scounteren,
    CsrId::Sscratch,
    CsrId::Sepc,
    CsrId::Scause,
    CsrId::Stval,
    CsrId::Sip,
    CsrId::Satp,
    CsrId::Mvendorid,
    CsrId::Marchid,
    CsrId::Mimpid,
    CsrId::Mhartid,
    CsrId::Mstatus,
    CsrId::Misa,
    CsrId::Medeleg,
    CsrId::Mideleg,
    CsrId::Mie,
    CsrId::Mtvec,
    CsrId::Mcounteren,
    CsrId::Mscratch,
    CsrId::Mepc,
    CsrId::Mcause,
    CsrId::Mtval,
    CsrId::Mip,
];

/// Total number of slots the shadow file allocates.
pub const SLOT_COUNT: usize = NAMED.len() + PMPCFG_COUNT as usize + PMPADDR_COUNT as usize;

impl CsrId {
    /// Decode a 12-bit CSR number into its catalogue entry. Returns `None`
    /// for any number the shadow file does not model.
    pub fn from_number(number: u16) -> Option<Self> {
        Some(match number {
            0x000 => CsrId::Ustatus,
            0x004 => CsrId::Uie,
            0x005 => CsrId::Utvec,
            0x040 => CsrId::Uscratch,
            0x041 => CsrId::Uepc,
            0x042 => CsrId::Ucause,
            0x043 => CsrId::Utval,
            0x044 => CsrId::Uip,
            0x100 => CsrId::Sstatus,
            0x102 => CsrId::Sedeleg,
            0x103 => CsrId::Sideleg,
            0x104 => CsrId::Sie,
            0x105 => CsrId::Stvec,
            0x106 => CsrId::Scounteren,
            0x140 => CsrId::Sscratch,
            0x141 => CsrId::Sepc,
            0x142 => CsrId::Scause,
            0x143 => CsrId::Stval,
            0x144 => CsrId::Sip,
            0x180 => CsrId::Satp,
            0xF11 => CsrId::Mvendorid,
            0xF12 => CsrId::Marchid,
            0xF13 => CsrId::Mimpid,
            0xF14 => CsrId::Mhartid,
            0x300 => CsrId::Mstatus,
            0x301 => CsrId::Misa,
            0x302 => CsrId::Medeleg,
            0x303 => CsrId::Mideleg,
            0x304 => CsrId::Mie,
            0x305 => CsrId::Mtvec,
            0x306 => CsrId::Mcounteren,
            0x340 => CsrId::Mscratch,
            0x341 => CsrId::Mepc,
            0x342 => CsrId::Mcause,
            0x343 => CsrId::Mtval,
            0x344 => CsrId::Mip,
            n if n >= PMPCFG_BASE && n < PMPCFG_BASE + PMPCFG_COUNT as u16 => {
                CsrId::PmpCfg((n - PMPCFG_BASE) as u8)
            }
            n if n >= PMPADDR_BASE && n < PMPADDR_BASE + PMPADDR_COUNT as u16 => {
                CsrId::PmpAddr((n - PMPADDR_BASE) as u8)
            }
            _ => return None,
        })
    }

    /// This CSR's slot index into the shadow file's flat value table.
    pub fn slot_index(self) -> usize {
        match self {
            CsrId::PmpCfg(i) => NAMED.len() + i as usize,
            CsrId::PmpAddr(i) => NAMED.len() + PMPCFG_COUNT as usize + i as usize,
            named => NAMED.iter().position(|&c| c == named).expect("named CSR missing from table"),
        }
    }

    /// The minimum guest privilege required to access this CSR.
    ///
    /// `U*` registers are `User`, `S*` registers are `Supervisor`,
    /// everything else (the `M*` registers and every PMP slot) is
    /// `Machine`.
    pub const fn minimum_mode(self) -> Mode {
        match self {
            CsrId::Ustatus | CsrId::Uie | CsrId::Utvec | CsrId::Uscratch | CsrId::Uepc
            | CsrId::Ucause | CsrId::Utval | CsrId::Uip => Mode::User,
            CsrId::Sstatus
            | CsrId::Sedeleg
            | CsrId::Sideleg
            | CsrId::Sie
            | CsrId::Stvec
            | CsrId::Scounteren
            | CsrId::Sscratch
            | CsrId::Sepc
            | CsrId::Scause
            | CsrId::Stval
            | CsrId::Sip
            | CsrId::Satp => Mode::Supervisor,
            _ => Mode::Machine,
        }
    }
}
