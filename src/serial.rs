//! Serial Logger
//!   Basic 16550 UART writer and a `log` backend that prints records to it.
//!   Code assumes the UART is already configured by earlier firmware; no timeouts or error handling implemented.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use core::fmt::{self, Write};

/// Destination for log output, one byte at a time.
pub trait ByteSink {
    fn write_byte(&self, byte: u8);
}

#[cfg(all(target_arch = "x86_64", feature = "x64"))]
pub use uart::Uart16550;

#[cfg(all(target_arch = "x86_64", feature = "x64"))]
mod uart {
    use super::ByteSink;

    ///
    /// Constants for UART registers
    ///
    const THR_REGISTER_OFFSET: u16 = 0x00;
    const LSR_REGISTER_OFFSET: u16 = 0x05;
    const LSR_TXRDY: u8 = 0x20;

    ///
    /// Port-mapped 16550 UART
    ///
    #[derive(Debug)]
    pub struct Uart16550 {
        base: u16,
    }

    impl Uart16550 {
        pub const fn new(base: u16) -> Self {
            Self { base }
        }

        fn read_register(&self, reg: u16) -> u8 {
            let mut port = x86_64::instructions::port::Port::<u8>::new(self.base + reg);
            // SAFETY: the UART ports are owned by firmware during boot.
            unsafe { port.read() }
        }

        fn write_register(&self, reg: u16, byte: u8) {
            let mut port = x86_64::instructions::port::Port::<u8>::new(self.base + reg);
            // SAFETY: the UART ports are owned by firmware during boot.
            unsafe { port.write(byte) }
        }
    }

    impl ByteSink for Uart16550 {
        fn write_byte(&self, byte: u8) {
            while self.read_register(LSR_REGISTER_OFFSET) & LSR_TXRDY == 0 {}
            self.write_register(THR_REGISTER_OFFSET, byte);
        }
    }
}

struct SinkWriter<'a, S: ByteSink>(&'a S);

impl<S: ByteSink> Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.0.write_byte(b'\r');
            }
            self.0.write_byte(byte);
        }
        Ok(())
    }
}

/// `log` backend writing `LEVEL - message` lines to a [`ByteSink`].
#[derive(Debug)]
pub struct SerialLogger<S> {
    sink: S,
    level: log::LevelFilter,
}

impl<S: ByteSink> SerialLogger<S> {
    pub const fn new(sink: S, level: log::LevelFilter) -> Self {
        Self { sink, level }
    }
}

impl<S: ByteSink + Send + Sync> log::Log for SerialLogger<S> {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // SinkWriter never fails.
        writeln!(SinkWriter(&self.sink), "{} - {}", record.level(), record.args()).ok();
    }

    fn flush(&self) {}
}
