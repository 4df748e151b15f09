//! The seam between pure monitor logic and the host kernel that actually
//! owns a trapped guest process.
//!
//! A trap dispatcher needs four things from its host kernel: the trapped
//! program counter, a way to redirect it, a way to read a guest
//! instruction word, and a way to kill the current guest process.
//! `HostInterface` carries exactly those across the boundary, so
//! decode/emulate logic can be unit-tested against a fake host instead of
//! a real kernel.

/// Everything the monitor needs from the host kernel to service one
/// illegal-instruction trap.
pub trait HostInterface {
    /// The guest program counter at the time of the trap (`r_sepc()`, which
    /// xv6 keeps in lockstep with `trapframe->epc`).
    fn trap_pc(&self) -> u64;

    /// Redirect the guest's resumption address. Used both to advance past
    /// an emulated `CSRR`/`CSRW` and to redirect into a trap handler or
    /// restore a saved `epc` for `ECALL`/`SRET`/`MRET`.
    fn set_trap_pc(&mut self, pc: u64);

    /// Fetch one 32-bit little-endian instruction word from guest virtual
    /// memory (`copyin`). `None` signals a fatal copy-in failure.
    fn read_guest_u32(&self, vaddr: u64) -> Option<u32>;

    /// Read guest general-purpose register `index` (`1..=31`), addressed by
    /// an explicit index rather than pointer arithmetic into a trap frame.
    fn guest_register(&self, index: u8) -> u64;

    /// Write guest general-purpose register `index` (`1..=31`).
    fn set_guest_register(&mut self, index: u8, value: u64);

    /// Terminate the currently-trapped guest process (`setkilled`).
    fn kill_current(&mut self);

    /// An optional debug-console sink for classification/emulation trace
    /// lines. `None` by default: most hosts (including every unit test
    /// here) have no console wired up yet.
    fn log_sink(&mut self) -> Option<&mut dyn core::fmt::Write> {
        None
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::HostInterface;

    /// An in-memory `HostInterface` used by `decode`/`emulate`'s unit
    /// tests: a tiny guest image plus 32 general-purpose registers and a
    /// `killed` flag, no real trap dispatcher involved.
    pub struct FakeHost {
        pub trap_pc: u64,
        pub registers: [u64; 32],
        pub image: [(u64, u32); 8],
        pub killed: bool,
    }

    impl FakeHost {
        pub fn new(trap_pc: u64) -> Self {
            Self { trap_pc, registers: [0; 32], image: [(0, 0); 8], killed: false }
        }

        pub fn with_instruction(mut self, addr: u64, word: u32) -> Self {
            for slot in self.image.iter_mut() {
                if slot.0 == 0 && slot.1 == 0 {
                    *slot = (addr, word);
                    return self;
                }
            }
            panic!("FakeHost image capacity exceeded");
        }
    }

    impl HostInterface for FakeHost {
        fn trap_pc(&self) -> u64 {
            self.trap_pc
        }

        fn set_trap_pc(&mut self, pc: u64) {
            self.trap_pc = pc;
        }

        fn read_guest_u32(&self, vaddr: u64) -> Option<u32> {
            self.image.iter().find(|(addr, _)| *addr == vaddr).map(|(_, word)| *word)
        }

        fn guest_register(&self, index: u8) -> u64 {
            self.registers[index as usize]
        }

        fn set_guest_register(&mut self, index: u8, value: u64) {
            self.registers[index as usize] = value;
        }

        fn kill_current(&mut self) {
            self.killed = true;
        }
    }
}
