//! Contains all panic handling.

use ::core::{arch::asm, panic::PanicInfo};

use crate::debug::Uart;

/// Handles a panic by printing it to the UART console and parking the
/// hart. Nothing exists below BOOT that could service a shutdown request,
/// so this spins forever instead.
#[panic_handler]
pub fn handle_panic(panic_info: &PanicInfo) -> ! {
    let mut uart = Uart::new();
    hart::boot_log!(&mut uart, "{}", panic_info);

    loop {
        unsafe { asm!("wfi") };
    }
}
