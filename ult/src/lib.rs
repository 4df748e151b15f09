//! Cooperative user-level threads: a fixed 100-slot table, three
//! scheduling policies, and a hand-written context switch, all running at
//! a single privilege level with no timer interrupt involved.
//!
//! Public surface: [`init`], [`create`], [`schedule`], [`yield_now`],
//! [`destroy`], [`current_tid`].

#![no_std]
#![cfg_attr(not(test), allow(unused))]
#![cfg_attr(target_arch = "riscv64", feature(naked_functions))]

pub mod clock;
pub mod context;
pub mod error;
pub mod policy;
pub mod sched;
pub mod thread;

pub use clock::{CpuClock, MonotonicCounter};
pub use context::{context_switch, Context};
pub use error::CreateError;
pub use policy::SchedulingAlgorithm;
pub use sched::Scheduler;
pub use thread::{ThreadId, MAX_THREADS, SCHEDULER_TID};

type GlobalScheduler = Scheduler<MonotonicCounter>;

/// The thread table lives here, not behind [`hart::sync::TokenCell`]:
/// that guard panics on reentry, but reentry is exactly what this module
/// does on purpose. [`schedule`] calls into a thread's entry point without
/// ever returning from the surrounding Rust call frame — the thread then
/// calls back into [`yield_now`]/[`destroy`], reaching this same global
/// while the scheduler's own frame is still suspended further up the
/// native call stack. A reentrancy-checked lock would panic on exactly the
/// handoff this crate exists to provide. Soundness instead rests on the
/// same invariant every cooperative-threading runtime relies on: control
/// is never on more than one side of the switch at once, so the two
/// logical borrows this produces are never live simultaneously even
/// though neither the compiler nor a reentrancy counter can see that.
static mut SCHEDULER: Option<GlobalScheduler> = None;

/// # Safety
/// Must not be called while any other call into this module is in
/// progress on the same hart, except through the intended
/// schedule/yield/destroy handoff described on [`SCHEDULER`].
unsafe fn scheduler_mut() -> &'static mut GlobalScheduler {
    unsafe {
        (&raw mut SCHEDULER)
            .as_mut()
            .unwrap()
            .as_mut()
            .expect("ult::init must run before use")
    }
}

/// Install the thread table and choose the scheduling policy. Called once,
/// before any thread is created.
pub fn init(algorithm: SchedulingAlgorithm) {
    unsafe {
        SCHEDULER = Some(Scheduler::new(algorithm, MonotonicCounter::new()));
    }
}

/// Reserve a thread slot. `entry` is the address the new thread resumes at
/// on its first dispatch; `stack_top` is the highest address of its stack
/// (the stack grows down from it); `args` are copied into `a0..a5` for that
/// first resume.
pub fn create(entry: u64, stack_top: u64, args: [u64; 6], priority: i32) -> Result<ThreadId, CreateError> {
    unsafe { scheduler_mut() }.create(entry, stack_top, args, priority)
}

/// The thread id currently dispatched.
pub fn current_tid() -> ThreadId {
    unsafe { scheduler_mut() }.current_tid()
}

/// Run the scheduling loop until no thread is runnable.
///
/// # Safety
/// Every created thread's entry point and stack must be valid for the
/// lifetime of the call, and must itself only return control via
/// [`yield_now`] or [`destroy`].
pub unsafe fn schedule() {
    unsafe { scheduler_mut().run() }
}

/// Yield the calling thread back to the scheduler.
///
/// # Safety
/// Must be called from the thread [`current_tid`] identifies, on that
/// thread's own stack.
pub unsafe fn yield_now() {
    unsafe {
        let sched = scheduler_mut();
        let tid = sched.current_tid();
        sched.yield_now(tid)
    }
}

/// Free the calling thread's slot and return control to the scheduler.
/// Never returns.
///
/// # Safety
/// Same requirement as [`yield_now`].
pub unsafe fn destroy() -> ! {
    unsafe {
        let sched = scheduler_mut();
        let tid = sched.current_tid();
        sched.destroy_current(tid)
    }
}
