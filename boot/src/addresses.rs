//! Fixed physical addresses this platform's memory map assigns to BOOT's
//! inputs and outputs.
//!
//! The kernel image bases and DRAM boundaries below are representative
//! values for the QEMU `virt` machine this toolkit targets; a production
//! integration substitutes its own board's memory map.

/// Where BOOT itself is loaded and where the reset vector lands.
pub const BOOTLOADER_BASE: u64 = 0x8000_0000;

/// Fixed address of the system-information record.
pub const SYSINFO_ADDR: u64 = 0x8008_0000;

/// First address of DRAM accessible to the kernel, excluding BOOT's own
/// image.
pub const KERNBASE: u64 = 0x8020_0000;

/// Last address of DRAM accessible to the kernel.
pub const PHYSTOP: u64 = KERNBASE + 128 * 1024 * 1024;

/// Base address of the NORMAL kernel image.
pub const RAMDISK: u64 = 0x8800_0000;

/// Base address of the RECOVERY kernel image.
pub const RECOVERYDISK: u64 = 0x8c00_0000;

/// An upper bound on any image this platform boots, used only to size the
/// byte slice `start` hands to [`crate::select::decide`] before the real
/// size is known from the image's own ELF header.
pub const MAX_IMAGE_LEN: usize = 64 * 1024 * 1024;
