//! The shadow CSR file: the emulator's in-memory mirror of a guest's CSRs.
//!
//! Every slot starts at zero except `mvendorid`; the guest boots in
//! Machine mode; touching any `pmpcfg`/`pmpaddr` slot sets the
//! PMP-configured flag regardless of whether the access itself succeeds.
//! Backed by a flat `[CsrSlot; SLOT_COUNT]` rather than 36 struct fields
//! plus two 16/64-element arrays.

use crate::csr::{CsrId, PMPADDR_COUNT, PMPCFG_COUNT, SLOT_COUNT};
use hart::Mode;

/// The identity value `mvendorid` must always carry: ASCII "cse536" packed
/// into a 48-bit integer.
pub const VENDOR_ID: u64 = 0x637365353336;

/// An opaque page-table handle, reserved for a PMP-aware address-space
/// swap that is not yet wired up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageTableHandle(pub usize);

#[derive(Clone, Copy)]
struct CsrSlot {
    value: u64,
}

/// The monitor's full virtualized register state and guest-privilege
/// tracking.
pub struct ShadowCsrFile {
    slots: [CsrSlot; SLOT_COUNT],
    guest_mode: Mode,
    pmp_configured: bool,
    pmp_pagetable: Option<PageTableHandle>,
    og_pagetable: Option<PageTableHandle>,
}

impl ShadowCsrFile {
    /// Build a freshly initialized shadow file: every slot zero except
    /// `mvendorid`, guest privilege `Machine`, PMP not yet configured.
    pub fn new() -> Self {
        Self {
            slots: [CsrSlot { value: 0 }; SLOT_COUNT],
            guest_mode: Mode::Machine,
            pmp_configured: false,
            pmp_pagetable: None,
            og_pagetable: None,
        }
        .with_vendor_id_seeded()
    }

    fn with_vendor_id_seeded(mut self) -> Self {
        self.slots[CsrId::Mvendorid.slot_index()].value = VENDOR_ID;
        self
    }

    /// Reset to the initial state. Called whenever a guest is killed: the
    /// host's kill primitive terminates the process and the monitor
    /// reinitializes so the next guest starts from a clean register file.
    pub fn reinit(&mut self) {
        *self = Self::new();
    }

    pub fn guest_mode(&self) -> Mode {
        self.guest_mode
    }

    pub fn set_guest_mode(&mut self, mode: Mode) {
        self.guest_mode = mode;
    }

    pub fn pmp_configured(&self) -> bool {
        self.pmp_configured
    }

    /// The current value of `id`, without side effects. Used by tests and
    /// by emulation code that has already recorded any PMP-touch effect via
    /// [`Self::touch`].
    pub fn value(&self, id: CsrId) -> u64 {
        self.slots[id.slot_index()].value
    }

    /// Overwrite `id`'s value directly, bypassing the privilege rule. Used
    /// by emulation code that has already performed its own privilege
    /// check (`CSRW`) or that writes trap-setup registers as a side effect
    /// of emulating a privileged transfer (`ECALL`/`MRET`).
    pub fn write_raw(&mut self, id: CsrId, value: u64) {
        self.slots[id.slot_index()].value = value;
    }

    /// Record that `id` was accessed, setting the PMP-configured flag if it
    /// names a `pmpcfg`/`pmpaddr` slot, independent of whether the access
    /// ultimately succeeds.
    pub fn touch(&mut self, id: CsrId) {
        if matches!(id, CsrId::PmpCfg(_) | CsrId::PmpAddr(_)) {
            self.pmp_configured = true;
        }
    }

    pub fn pmp_pagetable(&self) -> Option<PageTableHandle> {
        self.pmp_pagetable
    }

    pub fn og_pagetable(&self) -> Option<PageTableHandle> {
        self.og_pagetable
    }
}

impl Default for ShadowCsrFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_file_matches_init_invariants() {
        let shadow = ShadowCsrFile::new();
        assert_eq!(shadow.value(CsrId::Mvendorid), VENDOR_ID);
        assert_eq!(shadow.guest_mode(), Mode::Machine);
        assert!(!shadow.pmp_configured());
        for i in 0..PMPCFG_COUNT {
            assert_eq!(shadow.value(CsrId::PmpCfg(i)), 0);
        }
        for i in 0..PMPADDR_COUNT {
            assert_eq!(shadow.value(CsrId::PmpAddr(i)), 0);
        }
    }

    #[test]
    fn touching_any_pmp_slot_sets_the_flag() {
        let mut shadow = ShadowCsrFile::new();
        assert!(!shadow.pmp_configured());
        shadow.touch(CsrId::PmpAddr(7));
        assert!(shadow.pmp_configured());
    }

    #[test]
    fn touching_a_non_pmp_slot_leaves_the_flag_clear() {
        let mut shadow = ShadowCsrFile::new();
        shadow.touch(CsrId::Sepc);
        assert!(!shadow.pmp_configured());
    }

    #[test]
    fn reinit_restores_initial_state_after_mutation() {
        let mut shadow = ShadowCsrFile::new();
        shadow.write_raw(CsrId::Mvendorid, 0);
        shadow.set_guest_mode(Mode::User);
        shadow.touch(CsrId::PmpCfg(0));

        shadow.reinit();

        assert_eq!(shadow.value(CsrId::Mvendorid), VENDOR_ID);
        assert_eq!(shadow.guest_mode(), Mode::Machine);
        assert!(!shadow.pmp_configured());
    }

    #[test]
    fn write_raw_round_trips() {
        let mut shadow = ShadowCsrFile::new();
        shadow.write_raw(CsrId::Stvec, 0x2000);
        assert_eq!(shadow.value(CsrId::Stvec), 0x2000);
    }
}
