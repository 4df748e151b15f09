//! Shared, dependency-light primitives used by `boot`, `tem`, and `ult`.
//!
//! Nothing in here touches a specific subsystem's data model; it just
//! collects the bits that would otherwise be copy-pasted across the three:
//! the U/S/M privilege ordinal, the single-hart borrowing discipline used to
//! guard each subsystem's singleton state, a small debug-console macro, and
//! an incremental SHA-256 wrapper.

#![no_std]

// `hart` is also compiled for the host, since `tem` and `ult` unit-test
// their pure decision logic on the host target; the target-arch assertion
// therefore lives in `boot`'s `main.rs`, the one binary that is always
// built for `riscv64gc-unknown-none-elf`, instead of here.
use static_assertions as _;

pub mod debug;
pub mod error;
pub mod hash;
pub mod mode;
pub mod sync;

pub use error::HaltError;
pub use mode::Mode;
pub use sync::{Token, TokenCell};
