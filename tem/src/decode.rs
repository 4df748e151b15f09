//! Decode a trapped 32-bit instruction word into the privileged operation
//! it names.
//!
//! Only opcode `0x73` (`SYSTEM`) is handled: `op[6:0]`, `rd[11:7]`,
//! `funct3[14:12]`, `rs1[19:15]`, `csr[31:20]`. `funct3 == 0` with
//! `rd == rs1 == 0` selects among `ECALL`/`SRET`/`MRET` by CSR number,
//! gated by the current guest mode: `SRET` is accepted from S mode or
//! higher (Machine mode is allowed to execute it, unlike the exact S-only
//! match a stricter decoder might use), `MRET` only from exactly M mode.

use crate::csr::CsrId;
use crate::fault::Fault;
use hart::{HaltError, Mode};

const SYSTEM_OPCODE: u8 = 0x73;
const ECALL_CSR: u16 = 0x000;
const SRET_CSR: u16 = 0x102;
const MRET_CSR: u16 = 0x302;

/// A decoded privileged instruction, ready for [`crate::emulate::emulate`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Decoded {
    Ecall,
    Sret,
    Mret,
    /// `CSRRS csr, rd` with a zero write mask — used here as a plain read.
    Csrr { rd: u8, rs1: u8, csr: CsrId },
    Csrw { rd: u8, rs1: u8, csr: CsrId },
}

/// Why decode could not produce a [`Decoded`] instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeError {
    /// A condition the host cannot recover from: an opcode other than
    /// `SYSTEM` reaching the decoder, or a CSR number with no shadow-file
    /// entry.
    Fatal(HaltError),
    /// A malformed or disallowed privileged instruction that only kills
    /// the guest.
    Fault(Fault),
}

struct RawFields {
    op: u8,
    rd: u8,
    funct3: u8,
    rs1: u8,
    csr_number: u16,
}

fn fields(word: u32) -> RawFields {
    RawFields {
        op: (word & 0x7F) as u8,
        rd: ((word >> 7) & 0x1F) as u8,
        funct3: ((word >> 12) & 0x7) as u8,
        rs1: ((word >> 15) & 0x1F) as u8,
        csr_number: ((word >> 20) & 0xFFF) as u16,
    }
}

/// Decode `word`, trapped while the guest was executing in `guest_mode`.
pub fn decode(word: u32, guest_mode: Mode) -> Result<Decoded, DecodeError> {
    let f = fields(word);
    if f.op != SYSTEM_OPCODE {
        return Err(DecodeError::Fatal(HaltError::InvalidInstruction));
    }

    match f.funct3 {
        0 if f.rd == 0 && f.rs1 == 0 => match f.csr_number {
            ECALL_CSR => Ok(Decoded::Ecall),
            SRET_CSR if guest_mode >= Mode::Supervisor => Ok(Decoded::Sret),
            MRET_CSR if guest_mode == Mode::Machine => Ok(Decoded::Mret),
            _ => Err(DecodeError::Fault(Fault::UnrecognizedInstruction)),
        },
        0 => Err(DecodeError::Fault(Fault::UnrecognizedInstruction)),
        1 => csr_op(f.csr_number, |csr| Decoded::Csrw { rd: f.rd, rs1: f.rs1, csr }),
        2 => csr_op(f.csr_number, |csr| Decoded::Csrr { rd: f.rd, rs1: f.rs1, csr }),
        _ => Err(DecodeError::Fault(Fault::UnrecognizedInstruction)),
    }
}

fn csr_op(csr_number: u16, build: impl FnOnce(CsrId) -> Decoded) -> Result<Decoded, DecodeError> {
    CsrId::from_number(csr_number)
        .map(build)
        .ok_or(DecodeError::Fatal(HaltError::UnknownCsr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_word(rd: u8, funct3: u8, rs1: u8, csr: u16) -> u32 {
        SYSTEM_OPCODE as u32
            | (rd as u32) << 7
            | (funct3 as u32) << 12
            | (rs1 as u32) << 15
            | (csr as u32) << 20
    }

    #[test]
    fn ecall_decodes_from_any_mode() {
        let word = system_word(0, 0, 0, ECALL_CSR);
        assert_eq!(decode(word, Mode::User), Ok(Decoded::Ecall));
        assert_eq!(decode(word, Mode::Machine), Ok(Decoded::Ecall));
    }

    #[test]
    fn sret_requires_supervisor_or_higher() {
        let word = system_word(0, 0, 0, SRET_CSR);
        assert_eq!(decode(word, Mode::Supervisor), Ok(Decoded::Sret));
        assert_eq!(decode(word, Mode::Machine), Ok(Decoded::Sret));
        assert_eq!(
            decode(word, Mode::User),
            Err(DecodeError::Fault(Fault::UnrecognizedInstruction))
        );
    }

    #[test]
    fn mret_requires_exactly_machine_mode() {
        let word = system_word(0, 0, 0, MRET_CSR);
        assert_eq!(decode(word, Mode::Machine), Ok(Decoded::Mret));
        assert_eq!(
            decode(word, Mode::Supervisor),
            Err(DecodeError::Fault(Fault::UnrecognizedInstruction))
        );
    }

    #[test]
    fn csrr_known_csr_decodes() {
        let word = system_word(5, 2, 0, 0x300); // csrr x5, mstatus
        assert_eq!(
            decode(word, Mode::Machine),
            Ok(Decoded::Csrr { rd: 5, rs1: 0, csr: CsrId::Mstatus })
        );
    }

    #[test]
    fn csrw_unknown_csr_is_fatal() {
        let word = system_word(0, 1, 7, 0x999);
        assert_eq!(decode(word, Mode::Machine), Err(DecodeError::Fatal(HaltError::UnknownCsr)));
    }

    #[test]
    fn non_system_opcode_is_fatal() {
        let word = 0x0000_0013; // addi x0, x0, 0
        assert_eq!(
            decode(word, Mode::Machine),
            Err(DecodeError::Fatal(HaltError::InvalidInstruction))
        );
    }

    #[test]
    fn unclassifiable_funct3_zero_word_is_a_guest_fault() {
        let word = system_word(3, 0, 0, 0x123);
        assert_eq!(
            decode(word, Mode::Machine),
            Err(DecodeError::Fault(Fault::UnrecognizedInstruction))
        );
    }
}
