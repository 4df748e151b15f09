//! Single-hart borrowing discipline for the three subsystems' singleton
//! state (the shadow CSR file, the thread table, the system-info record).
//!
//! A single atomic `bool` stands in for a lock: this toolkit never runs
//! more than one hart, so there is no holder identity to track, only
//! whether the token is currently out. That still gives each subsystem a
//! real type that statically proves "mutable access requires holding the
//! token" instead of a bare `static mut`.

use ::core::{cell::UnsafeCell, sync::atomic::AtomicBool, sync::atomic::Ordering};

/// A token confers permission to borrow the contents of a [`TokenCell`].
///
/// There is at most one live `Token` per subsystem at a time; acquiring a
/// second one before the first is released panics rather than spinning.
/// Single-hart, cooperative, never-reentrant use means a second acquisition
/// attempt is always a bug (re-entrant BOOT, a nested trap in TEM, a
/// non-cooperative preemption in ULT) rather than contention to wait out.
#[derive(Debug)]
pub struct Token<'a> {
    held: &'a AtomicBool,
}

impl<'a> Token<'a> {
    /// Acquire the token guarding `held`.
    ///
    /// # Panics
    /// Panics if the token is already held.
    pub fn acquire(held: &'a AtomicBool) -> Self {
        let was_held = held.swap(true, Ordering::Acquire);
        assert!(!was_held, "re-entrant access to single-hart singleton state");
        Self { held }
    }
}

impl Drop for Token<'_> {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}

/// A transparent wrapper over a `T` which only allows its contents to be
/// borrowed by the holder of a matching [`Token`].
#[repr(transparent)]
pub struct TokenCell<T>(UnsafeCell<T>);

// SAFETY: a `Token` proves unique, temporally-exclusive access; the cell
// itself never hands out overlapping references.
unsafe impl<T> Sync for TokenCell<T> where T: Send {}

impl<T> TokenCell<T> {
    pub const fn new(value: T) -> Self {
        Self(UnsafeCell::new(value))
    }

    pub fn borrow<'a>(&'a self, _token: &'a Token<'_>) -> &'a T {
        // SAFETY: the token is temporally unique, so this shared borrow
        // cannot alias a mutable one for as long as the token is held.
        unsafe { &*self.0.get() }
    }

    pub fn borrow_mut<'a>(&'a self, _token: &'a mut Token<'_>) -> &'a mut T {
        // SAFETY: the token is temporally unique and mutably borrowed here,
        // so this is the only live reference to the cell's contents.
        unsafe { &mut *self.0.get() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::core::sync::atomic::AtomicBool;

    #[test]
    fn borrow_roundtrips() {
        static HELD: AtomicBool = AtomicBool::new(false);
        let cell = TokenCell::new(41);

        let mut token = Token::acquire(&HELD);
        *cell.borrow_mut(&mut token) += 1;
        assert_eq!(*cell.borrow(&token), 42);
    }

    #[test]
    #[should_panic(expected = "re-entrant")]
    fn reentrant_acquire_panics() {
        static HELD: AtomicBool = AtomicBool::new(false);
        let _outer = Token::acquire(&HELD);
        let _inner = Token::acquire(&HELD);
    }

    #[test]
    fn token_release_allows_reacquire() {
        static HELD: AtomicBool = AtomicBool::new(false);
        {
            let _token = Token::acquire(&HELD);
        }
        let _token = Token::acquire(&HELD);
    }
}
