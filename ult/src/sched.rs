//! The scheduling loop: owns the thread table and drives cooperative
//! dispatch.
//!
//! [`policy::select`] dispatches round-robin, priority, and first-come-
//! first-served distinctly rather than letting every run fall through to
//! one of them. [`Scheduler::select_next`] returns every yielded thread to
//! `RUNNABLE` as soon as control comes back to the loop, which is what
//! produces the cyclic dispatch order (e.g. round robin's
//! `1, 2, 3, 1, 2, ...`) rather than only ever reviving the single
//! most-recently-yielded thread and leaving earlier yielders stuck.

use crate::clock::CpuClock;
use crate::context::{context_switch, Context};
use crate::error::CreateError;
use crate::policy::{self, SchedulingAlgorithm};
use crate::thread::{new_table, ThreadId, ThreadRecord, ThreadState, MAX_THREADS, SCHEDULER_TID};

pub struct Scheduler<C: CpuClock> {
    table: [ThreadRecord; MAX_THREADS],
    algorithm: SchedulingAlgorithm,
    current: ThreadId,
    last_yielded: Option<ThreadId>,
    scheduler_context: Context,
    clock: C,
}

impl<C: CpuClock> Scheduler<C> {
    pub fn new(algorithm: SchedulingAlgorithm, clock: C) -> Self {
        Self {
            table: new_table(),
            algorithm,
            current: SCHEDULER_TID,
            last_yielded: None,
            scheduler_context: Context::zeroed(),
            clock,
        }
    }

    /// The thread presently dispatched (or `SCHEDULER_TID` before the first
    /// dispatch).
    pub fn current_tid(&self) -> ThreadId {
        self.current
    }

    /// Reserve a slot in `1..MAX_THREADS`, seed its context so that
    /// resuming it for the first time enters `entry(args[0], .., args[5])`
    /// on a stack rooted at `stack_top`.
    pub fn create(
        &mut self,
        entry: u64,
        stack_top: u64,
        args: [u64; 6],
        priority: i32,
    ) -> Result<ThreadId, CreateError> {
        let tid = (1..MAX_THREADS)
            .find(|&i| self.table[i].state == ThreadState::Free)
            .ok_or(CreateError::TableFull)?;

        let rec = &mut self.table[tid];
        rec.state = ThreadState::Runnable;
        rec.priority = priority;
        rec.stack_base = stack_top;
        rec.last_scheduled_time = self.clock.now();
        rec.context = Context::zeroed();
        rec.context.sp = stack_top;
        rec.context.ra = entry;
        rec.context.a = args;
        Ok(tid)
    }

    /// The pure decision core of the scheduling loop: fold the previously
    /// yielded thread back into the runnable pool, then ask the configured
    /// policy which thread goes next. Returns `None` when nothing is left
    /// to run, i.e. the loop should exit.
    pub fn select_next(&mut self) -> Option<ThreadId> {
        if let Some(last) = self.last_yielded.take() {
            if self.table[last].state == ThreadState::Yield {
                self.table[last].state = ThreadState::Runnable;
            }
        }

        let tid = policy::select(self.algorithm, &self.table, self.current, &self.clock);
        if tid == SCHEDULER_TID {
            return None;
        }

        self.table[tid].last_scheduled_time = self.clock.now();
        self.current = tid;
        Some(tid)
    }

    /// Mark `tid` as having yielded without performing the context switch;
    /// exposed separately from [`Self::yield_now`] so tests can drive the
    /// dispatch loop without executing real assembly.
    fn prepare_yield(&mut self, tid: ThreadId) {
        self.table[tid].state = ThreadState::Yield;
        self.last_yielded = Some(tid);
    }

    /// Free `tid`'s slot without performing the context switch.
    fn prepare_destroy(&mut self, tid: ThreadId) {
        self.table[tid] = ThreadRecord::free(tid);
    }

    /// Run the scheduling loop until no thread is runnable. Never returns
    /// early: each dispatched thread runs until it yields or destroys
    /// itself, both of which switch control back here.
    ///
    /// # Safety
    /// Every slot selected by `select_next` must hold a context that is
    /// either freshly seeded by [`Self::create`] or was saved by a prior
    /// [`Self::yield_now`]/[`context_switch`] — true as long as callers only
    /// reach this through the crate's public surface.
    pub unsafe fn run(&mut self) {
        loop {
            match self.select_next() {
                Some(tid) => unsafe {
                    context_switch(&mut self.scheduler_context, &mut self.table[tid].context);
                },
                None => return,
            }
        }
    }

    /// Called from inside the running thread `tid`: yield the processor
    /// back to the scheduling loop.
    ///
    /// # Safety
    /// Must be called from the thread currently dispatched by `run`, on
    /// that thread's own stack.
    pub unsafe fn yield_now(&mut self, tid: ThreadId) {
        self.prepare_yield(tid);
        unsafe {
            context_switch(&mut self.table[tid].context, &mut self.scheduler_context);
        }
    }

    /// Called from inside the running thread `tid`: free its slot and
    /// return control to the scheduling loop. Never returns.
    ///
    /// # Safety
    /// Same requirement as [`Self::yield_now`].
    pub unsafe fn destroy_current(&mut self, tid: ThreadId) -> ! {
        self.prepare_destroy(tid);
        let mut discard = Context::zeroed();
        unsafe {
            context_switch(&mut discard, &mut self.scheduler_context);
        }
        unreachable!("a destroyed thread's slot is never selected again")
    }
}
