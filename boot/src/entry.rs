//! The single entrypoint into BOOT: the platform's reset vector lands
//! here directly, with no firmware underneath.
//!
//! A `#[naked]` function sets up a per-hart stack pointer before it's safe
//! to call into Rust: hart N gets the Nth stack slab, growing down from
//! the top of the reserved region.

use ::core::arch::asm;

use crate::layout::{STACK_SIZE_PER_HART, STACK_TOP};

/// Entered by the platform at reset on every hart, with `mhartid` already
/// loaded into `a0` per the RISC-V boot protocol.
///
/// # Safety
/// Must be the very first code to run after reset, on a hart whose `a0`
/// holds its own hart ID and whose CSRs are in their post-reset state.
#[naked]
#[no_mangle]
#[link_section = ".text.entry"]
pub unsafe extern "C" fn _entry() -> ! {
    unsafe {
        asm!(
            // a0 holds mhartid on entry. Give hart N the Nth stack slab,
            // growing down from the top of the reserved region.
            "la sp, {stack_top}",
            "li t0, {stack_size}",
            "addi t1, a0, 1",
            "mul t0, t0, t1",
            "sub sp, sp, t0",

            "call {start}",

            stack_top = sym STACK_TOP,
            stack_size = const STACK_SIZE_PER_HART,
            start = sym crate::runtime::start,
            options(noreturn),
        )
    }
}
