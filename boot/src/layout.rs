//! Linker-provided symbols describing BOOT's own image and the per-hart
//! stacks `layout.ld` reserves after it.
//!
//! Zero-sized `extern "C"` statics bound to linker symbols via
//! `#[link_name]`, narrowed to the two symbols this bootloader's entry
//! sequence actually needs.

use ::core::ptr::addr_of;

extern "C" {
    #[link_name = "__bootloader_end"]
    static BOOTLOADER_END: ();

    #[link_name = "__stack_top"]
    pub(crate) static STACK_TOP: ();
}

/// One past the last byte of BOOT's own loaded image (text, rodata, data,
/// bss), as reported to the kernel in [`crate::sysinfo::SystemInfo`].
pub fn bootloader_end() -> u64 {
    unsafe { addr_of!(BOOTLOADER_END) as u64 }
}

/// The top of the stack region `layout.ld` reserves, shared by up to
/// [`MAX_HARTS`] harts at [`STACK_SIZE_PER_HART`] bytes each.
pub fn stack_top() -> u64 {
    unsafe { addr_of!(STACK_TOP) as u64 }
}

/// The number of per-hart stacks `layout.ld` reserves.
pub const MAX_HARTS: u64 = 4;

/// Bytes of stack space reserved per hart.
pub const STACK_SIZE_PER_HART: u64 = 64 * 1024;
