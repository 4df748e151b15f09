#![no_std]
#![cfg_attr(not(test), no_main)]
#![cfg_attr(not(test), feature(asm_const, asm_sym, naked_functions))]

use static_assertions as _;

#[cfg(not(test))]
static_assertions::assert_cfg!(target_arch = "riscv64");

#[macro_use]
extern crate hart;

pub mod addresses;
pub mod debug;
pub mod elf;
pub mod image;
pub mod layout;
pub mod measure;
pub mod pmp;
pub mod select;
pub mod sysinfo;
pub mod trusted_hash;

#[cfg(not(test))]
pub mod entry;
#[cfg(not(test))]
pub mod panic;

// Everything below needs real RISC-V machine-mode CSRs and inline asm, so it
// only exists in the embedded build: a `cargo test` run targets the host to
// exercise the pure modules above, and none of this would assemble there.
#[cfg(not(test))]
mod runtime {
    use ::core::arch::asm;

    use crate::debug::Uart;
    use crate::image::{BlockBuf, BlockDevice, KernelKind};
    use crate::{addresses, image, layout, pmp, select, sysinfo, trusted_hash};

    /// A kernel image slot backed directly by physical memory: the "block
    /// device" is a RAM disk mapped at a fixed address, so reading block N
    /// is just reading `N * BSIZE` bytes into it.
    struct RamDisk {
        normal_base: *const u8,
        recovery_base: *const u8,
    }

    impl RamDisk {
        const fn new() -> Self {
            Self {
                normal_base: addresses::RAMDISK as *const u8,
                recovery_base: addresses::RECOVERYDISK as *const u8,
            }
        }
    }

    impl BlockDevice for RamDisk {
        fn kernel_copy(&mut self, kind: KernelKind, buf: &mut BlockBuf) {
            let base = match kind {
                KernelKind::Normal => self.normal_base,
                KernelKind::Recovery => self.recovery_base,
            };
            unsafe {
                let src = base.add(buf.blockno as usize * image::BSIZE);
                core::ptr::copy_nonoverlapping(src, buf.data.as_mut_ptr(), image::BSIZE);
            }
            buf.valid = true;
        }
    }

    /// Entered from [`crate::entry::_entry`] with `a0` holding the hart ID.
    ///
    /// # Safety
    /// Must run with PMP, `satp`, and trap delegation all in their post-reset
    /// state, before any other code has touched the RAM disk regions.
    #[no_mangle]
    pub(crate) unsafe extern "C" fn start(hart_id: u64) -> ! {
        if hart_id != 0 {
            hart_park();
        }

        let mut uart = Uart::new();
        boot_log!(&mut uart, "starting on hart {}", hart_id);

        let mut dev = RamDisk::new();

        // Header blocks (ELF + program headers) are read directly; the rest
        // of the image is streamed in block by block once `select::decide`
        // names how much to copy.
        let normal_header = unsafe { core::slice::from_raw_parts(dev.normal_base, addresses::MAX_IMAGE_LEN) };
        let recovery_header =
            unsafe { core::slice::from_raw_parts(dev.recovery_base, addresses::MAX_IMAGE_LEN) };

        let decision = select::decide(normal_header, recovery_header, trusted_hash::TRUSTED_KERNEL_HASH);

        boot_log!(
            &mut uart,
            "selected {:?} image: entry={:#x} load={:#x} size={}",
            decision.loaded,
            decision.entry,
            decision.load_addr,
            decision.size
        );

        let kind = match decision.loaded {
            select::LoadedImage::Normal => KernelKind::Normal,
            select::LoadedImage::Recovery => KernelKind::Recovery,
        };

        let dest = unsafe {
            core::slice::from_raw_parts_mut(
                decision.load_addr as *mut u8,
                (decision.size as usize).saturating_sub(4 * image::BSIZE),
            )
        };
        image::copy_kernel_image(&mut dev, kind, decision.size, dest);

        let info = sysinfo::SystemInfo::new(
            addresses::BOOTLOADER_BASE,
            layout::bootloader_end(),
            decision.expected_hash,
            decision.observed_hash,
        );
        unsafe { info.publish() };

        boot_log!(&mut uart, "handing off to supervisor mode at {:#x}", decision.entry);
        unsafe { handoff(decision.entry) }
    }

    /// Park a non-boot hart. BOOT only brings up hart 0; the rest wait for
    /// an SBI (provided by the kernel it hands off to, if any) to start
    /// them.
    fn hart_park() -> ! {
        loop {
            unsafe { asm!("wfi") };
        }
    }

    /// Drop from machine mode to supervisor mode at `entry`, with PMP
    /// configured per [`pmp::active_profile`] and traps/interrupts delegated.
    ///
    /// Sets `mstatus.MPP = S`, `satp = 0` (no translation yet),
    /// `pmpaddrN`/`pmpcfg0` from the active profile, `medeleg`/`mideleg =
    /// 0xffff`, supervisor interrupts enabled in `sie`, `mepc = entry`,
    /// then `mret`.
    ///
    /// # Safety
    /// `entry` must be the address of a valid supervisor-mode entry point
    /// that never returns; PMP and the kernel image must already be fully
    /// written to memory.
    unsafe fn handoff(entry: u64) -> ! {
        let profile = pmp::active_profile();

        unsafe {
            asm!(
                // mstatus.MPP = S (0b01), bits [12:11].
                "li t0, 0x1800",
                "csrc mstatus, t0",
                "li t0, 0x800",
                "csrs mstatus, t0",

                "csrw satp, zero",

                "csrw pmpaddr0, {pmpaddr0}",
                "csrw pmpaddr1, {pmpaddr1}",
                "csrw pmpaddr2, {pmpaddr2}",
                "csrw pmpcfg0, {pmpcfg0}",

                "li t0, 0xffff",
                "csrw medeleg, t0",
                "csrw mideleg, t0",

                "csrr t0, sie",
                "li t1, 0x222",
                "or t0, t0, t1",
                "csrw sie, t0",

                "csrw mepc, {entry}",

                "la ra, {spurious_return}",
                "mret",

                pmpaddr0 = in(reg) profile.pmpaddr[0],
                pmpaddr1 = in(reg) profile.pmpaddr[1],
                pmpaddr2 = in(reg) profile.pmpaddr[2],
                pmpcfg0 = in(reg) profile.pmpcfg0,
                entry = in(reg) entry,
                spurious_return = sym spurious_return,
                out("t0") _,
                out("t1") _,
                options(noreturn),
            )
        }
    }

    /// `mret` never returns to the instruction after it; if control somehow
    /// lands back here, the supervisor-mode kernel returned, which is
    /// always a bug.
    #[no_mangle]
    extern "C" fn spurious_return() -> ! {
        panic!("supervisor-mode kernel returned to bootloader");
    }
}
