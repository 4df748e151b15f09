//! The system-information record BOOT leaves behind for the kernel it
//! hands off to, published at a fixed address.
//!
//! `#[repr(C)]` so a kernel's own C struct definition can read it with a
//! matching field layout.

use hart::hash::Digest32;

use crate::addresses;

/// Published at [`addresses::SYSINFO_ADDR`] once BOOT has decided which
/// image to run.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct SystemInfo {
    pub bootloader_start: u64,
    pub bootloader_end: u64,
    pub dram_start: u64,
    pub dram_end: u64,
    pub expected_hash: Digest32,
    pub observed_hash: Digest32,
}

static_assertions::assert_eq_size!(SystemInfo, [u8; 8 * 4 + 32 * 2]);

impl SystemInfo {
    pub fn new(bootloader_start: u64, bootloader_end: u64, expected_hash: Digest32, observed_hash: Digest32) -> Self {
        Self {
            bootloader_start,
            bootloader_end,
            dram_start: addresses::KERNBASE,
            dram_end: addresses::PHYSTOP,
            expected_hash,
            observed_hash,
        }
    }

    /// Write `self` to the fixed system-info address.
    ///
    /// # Safety
    /// The caller must guarantee exclusive access to
    /// [`addresses::SYSINFO_ADDR`] (no other hart or subsystem reads or
    /// writes it concurrently) and that the address is mapped and writable.
    pub unsafe fn publish(&self) {
        let ptr = addresses::SYSINFO_ADDR as *mut SystemInfo;
        unsafe { ptr.write_volatile(*self) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_dram_bounds_from_addresses() {
        let info = SystemInfo::new(0x8000_0000, 0x8008_0000, [1; 32], [2; 32]);
        assert_eq!(info.dram_start, addresses::KERNBASE);
        assert_eq!(info.dram_end, addresses::PHYSTOP);
        assert_eq!(info.expected_hash, [1; 32]);
        assert_eq!(info.observed_hash, [2; 32]);
    }
}
