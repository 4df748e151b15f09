//! A subsystem-agnostic debug logging helper.
//!
//! A file/line-tagged, level-prefixed line format written to a
//! `core::fmt::Write` sink. BOOT, TEM, and ULT each reach their debug
//! console through a different path (BOOT writes UART directly, TEM has
//! SBI below it, ULT has nothing below it but its host OS), so this module
//! takes the sink as a parameter instead of hardcoding one.

use ::core::fmt::{Arguments, Result, Write};

/// Write one formatted, level-tagged, file/line-tagged log line to `sink`.
///
/// A write failure to a debug console is not something any of these
/// subsystems can meaningfully recover from, so it panics rather than
/// threading a `Result` through every call site.
pub fn log_line(sink: &mut dyn Write, level: &str, args: Arguments, file: &str, line: u32) {
    writeln!(sink, "[{}]\t{} ({}:{})", level, args, file, line)
        .expect("debug console writes should never fail");
}

/// Log a line tagged `BOOT` through `$sink`.
#[macro_export]
macro_rules! boot_log {
    ($sink:expr, $($arg:tt)*) => (
        $crate::debug::log_line(
            $sink,
            "BOOT",
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    );
}

/// Log a line tagged `TEM` through `$sink`.
#[macro_export]
macro_rules! tem_log {
    ($sink:expr, $($arg:tt)*) => (
        $crate::debug::log_line(
            $sink,
            "TEM",
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    );
}

/// Log a line tagged `ULT` through `$sink`.
#[macro_export]
macro_rules! ult_log {
    ($sink:expr, $($arg:tt)*) => (
        $crate::debug::log_line(
            $sink,
            "ULT",
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixed-capacity `Write` sink, so this test needs no allocator.
    struct Recorder {
        buf: [u8; 128],
        len: usize,
    }

    impl Recorder {
        fn new() -> Self {
            Self { buf: [0; 128], len: 0 }
        }

        fn as_str(&self) -> &str {
            core::str::from_utf8(&self.buf[..self.len]).unwrap()
        }
    }

    impl Write for Recorder {
        fn write_str(&mut self, s: &str) -> Result {
            let bytes = s.as_bytes();
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
            Ok(())
        }
    }

    #[test]
    fn line_includes_level_and_location() {
        let mut rec = Recorder::new();
        log_line(&mut rec, "BOOT", format_args!("hello {}", 42), "x.rs", 7);
        assert!(rec.as_str().contains("[BOOT]"));
        assert!(rec.as_str().contains("hello 42"));
        assert!(rec.as_str().contains("x.rs:7"));
    }
}
