//! A polled 16550 UART console, since no SBI exists below BOOT to print
//! through.
//!
//! A `Write` impl wrapping a direct MMIO poll of a 16550-compatible UART.
//! The QEMU `virt` machine's UART lives at `0x1000_0000`.

use ::core::fmt::{self, Write};

const UART_BASE: usize = 0x1000_0000;
const LSR_OFFSET: usize = 5;
const LSR_THR_EMPTY: u8 = 1 << 5;

/// A handle to the platform's polled UART.
pub struct Uart;

impl Uart {
    pub const fn new() -> Self {
        Self
    }

    fn put_byte(&mut self, byte: u8) {
        unsafe {
            let lsr = (UART_BASE + LSR_OFFSET) as *const u8;
            while core::ptr::read_volatile(lsr) & LSR_THR_EMPTY == 0 {}
            let thr = UART_BASE as *mut u8;
            core::ptr::write_volatile(thr, byte);
        }
    }
}

impl Write for Uart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.put_byte(byte);
        }
        Ok(())
    }
}
