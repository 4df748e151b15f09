//! Trap-and-emulate CSR monitor.
//!
//! A supervisor-mode interpreter that catches illegal-instruction traps
//! taken by a guest kernel executing privileged CSR operations (and the
//! privileged transfer instructions `ECALL`/`SRET`/`MRET`), emulating them
//! against a shadow register file and enforcing a three-level privilege
//! model on a guest that never actually runs in M or S mode.
//!
//! Two public entry points, matching the host trap dispatcher's contract:
//! [`init`] once at OS startup, [`handle_illegal_instruction`] on every
//! illegal-instruction exception.

#![no_std]

pub mod csr;
pub mod decode;
pub mod emulate;
pub mod fault;
pub mod host;
pub mod shadow;

pub use csr::CsrId;
pub use decode::{DecodeError, Decoded};
pub use emulate::EmulateError;
pub use fault::Fault;
pub use host::HostInterface;
pub use shadow::ShadowCsrFile;

use core::sync::atomic::AtomicBool;
use hart::{HaltError, Token, TokenCell};

static STATE_HELD: AtomicBool = AtomicBool::new(false);
static STATE: TokenCell<Option<ShadowCsrFile>> = TokenCell::new(None);

/// Populate the shadow CSR file with its initial contents. Called once at
/// OS startup, before any guest process can trap into the monitor.
pub fn init() {
    let mut token = Token::acquire(&STATE_HELD);
    *STATE.borrow_mut(&mut token) = Some(ShadowCsrFile::new());
}

/// Service one illegal-instruction trap, fetching the faulting word via
/// `host`, updating the shadow CSR file, and redirecting `host`'s trap
/// frame.
///
/// Returns `Err` only for fatal host errors (invalid opcode, unknown CSR
/// number, a structurally-impossible `xPP` decode) — callers should panic.
/// Guest-visible faults are handled internally: the guest is killed and the
/// monitor reinitialized.
pub fn handle_illegal_instruction<H: HostInterface>(host: &mut H) -> Result<(), HaltError> {
    let mut token = Token::acquire(&STATE_HELD);
    let shadow = STATE
        .borrow_mut(&mut token)
        .as_mut()
        .expect("tem::init must run before handling traps");
    step(shadow, host)
}

/// The pure core of [`handle_illegal_instruction`], taking the shadow file
/// directly instead of through the module singleton — this is what the
/// unit tests exercise.
pub fn step<H: HostInterface>(shadow: &mut ShadowCsrFile, host: &mut H) -> Result<(), HaltError> {
    let addr = host.trap_pc();
    let word = host.read_guest_u32(addr).ok_or(HaltError::InvalidInstruction)?;

    match decode::decode(word, shadow.guest_mode()) {
        Ok(instr) => {
            if let Some(sink) = host.log_sink() {
                hart::tem_log!(sink, "{:?} at {:#x}", instr, addr);
            }
            match emulate::emulate(instr, shadow, host) {
                Ok(()) => Ok(()),
                Err(EmulateError::Fault(fault)) => {
                    if let Some(sink) = host.log_sink() {
                        hart::tem_log!(sink, "guest killed: {:?}", fault);
                    }
                    host.kill_current();
                    shadow.reinit();
                    Ok(())
                }
                Err(EmulateError::Fatal(e)) => Err(e),
            }
        }
        Err(DecodeError::Fault(_)) => {
            host.kill_current();
            shadow.reinit();
            Ok(())
        }
        Err(DecodeError::Fatal(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    fn system_word(rd: u8, funct3: u8, rs1: u8, csr: u16) -> u32 {
        0x73 | (rd as u32) << 7 | (funct3 as u32) << 12 | (rs1 as u32) << 15 | (csr as u32) << 20
    }

    #[test]
    fn init_sets_vendor_id_and_machine_mode() {
        let shadow = ShadowCsrFile::new();
        assert_eq!(shadow.value(CsrId::Mvendorid), shadow::VENDOR_ID);
        assert_eq!(shadow.guest_mode(), hart::Mode::Machine);
    }

    /// A U-mode guest executes `csrr x5, mstatus` (`0x300022F3`) and is
    /// killed, with the shadow file reinitialized.
    #[test]
    fn privilege_drop_kills_guest_and_reinitializes() {
        let mut shadow = ShadowCsrFile::new();
        shadow.set_guest_mode(hart::Mode::User);
        shadow.write_raw(CsrId::Mstatus, 0xdead);

        let mut host = FakeHost::new(0x1000).with_instruction(0x1000, 0x300022F3);
        step(&mut shadow, &mut host).unwrap();

        assert!(host.killed);
        assert_eq!(shadow.guest_mode(), hart::Mode::Machine);
        assert_eq!(shadow.value(CsrId::Mstatus), 0, "reinit must clear the stale write");
    }

    /// `ECALL` from U-mode with `frame.epc = 0x1000`, shadow
    /// `stvec = 0x2000`.
    #[test]
    fn ecall_from_user_worked_example() {
        let mut shadow = ShadowCsrFile::new();
        shadow.set_guest_mode(hart::Mode::User);
        shadow.write_raw(CsrId::Stvec, 0x2000);

        let ecall_word = system_word(0, 0, 0, 0x000);
        let mut host = FakeHost::new(0x1000).with_instruction(0x1000, ecall_word);
        step(&mut shadow, &mut host).unwrap();

        assert_eq!(shadow.guest_mode(), hart::Mode::Supervisor);
        assert_eq!(shadow.value(CsrId::Scause), 8);
        assert_eq!(shadow.value(CsrId::Sepc), 0x1000);
        assert_eq!(host.trap_pc, 0x2000);
    }

    /// Shadow `mstatus` has `MPP = 1`, `mepc = 0x4000`, guest in M.
    #[test]
    fn mret_worked_example() {
        let mut shadow = ShadowCsrFile::new();
        shadow.set_guest_mode(hart::Mode::Machine);
        shadow.write_raw(CsrId::Mepc, 0x4000);
        shadow.write_raw(CsrId::Mstatus, 1 << 11);

        let mret_word = system_word(0, 0, 0, 0x302);
        let mut host = FakeHost::new(0x3000).with_instruction(0x3000, mret_word);
        step(&mut shadow, &mut host).unwrap();

        assert_eq!(shadow.guest_mode(), hart::Mode::Supervisor);
        assert_eq!(host.trap_pc, 0x4000);
        assert_eq!(shadow.value(CsrId::Mstatus) & (0x3 << 11), 0);
    }

    #[test]
    fn unsupported_opcode_is_fatal_to_the_host() {
        let mut shadow = ShadowCsrFile::new();
        let mut host = FakeHost::new(0x10).with_instruction(0x10, 0x0000_0013);
        assert_eq!(step(&mut shadow, &mut host), Err(HaltError::InvalidInstruction));
    }

    #[test]
    fn copyin_failure_is_fatal_to_the_host() {
        let mut shadow = ShadowCsrFile::new();
        let mut host = FakeHost::new(0xffff_ffff);
        assert_eq!(step(&mut shadow, &mut host), Err(HaltError::InvalidInstruction));
    }
}
