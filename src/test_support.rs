//! Test Support
//!
//! Simulated chipset register files and a log capture used by unit tests.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use std::{
    cell::RefCell,
    collections::BTreeMap,
    format,
    string::String,
    sync::Once,
    vec::Vec,
};

use crate::cnl::access::{MmioAccess, PciConfigAccess, PciDevFn, PortIo};

/// PCI configuration space backed by a sparse dword map. Unbacked dwords read as all ones.
#[derive(Debug, Default, Clone)]
pub struct SimPci {
    dwords: BTreeMap<(PciDevFn, u16), u32>,
}

impl SimPci {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config32(mut self, dev: PciDevFn, offset: u16, value: u32) -> Self {
        self.dwords.insert((dev, offset & !3), value);
        self
    }

    /// Writes the 16-bit field at `offset`, preserving the other half of its dword.
    pub fn with_config16(mut self, dev: PciDevFn, offset: u16, value: u16) -> Self {
        let shift = u32::from(offset & 2) * 8;
        let dword = self.dwords.entry((dev, offset & !3)).or_insert(u32::MAX);
        *dword = (*dword & !(0xFFFF << shift)) | (u32::from(value) << shift);
        self
    }
}

impl PciConfigAccess for SimPci {
    fn read_config16(&self, dev: PciDevFn, offset: u16) -> u16 {
        let shift = u32::from(offset & 2) * 8;
        (self.read_config32(dev, offset) >> shift) as u16
    }

    fn read_config32(&self, dev: PciDevFn, offset: u16) -> u32 {
        self.dwords.get(&(dev, offset & !3)).copied().unwrap_or(u32::MAX)
    }
}

/// Port I/O register file. Ports registered with a write-one-to-clear mask clear those bits when a 1 is written.
#[derive(Debug, Default)]
pub struct SimPortIo {
    ports: BTreeMap<u16, u16>,
    w1c_masks: BTreeMap<u16, u16>,
    pub reads: Vec<u16>,
    pub writes: Vec<(u16, u16)>,
}

impl SimPortIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16, value: u16) -> Self {
        self.ports.insert(port, value);
        self
    }

    pub fn with_w1c_port(mut self, port: u16, value: u16, mask: u16) -> Self {
        self.ports.insert(port, value);
        self.w1c_masks.insert(port, mask);
        self
    }

    /// Raw register value without recording an access.
    pub fn peek(&self, port: u16) -> u16 {
        self.ports.get(&port).copied().unwrap_or(u16::MAX)
    }

    pub fn writes_to(&self, port: u16) -> usize {
        self.writes.iter().filter(|(p, _)| *p == port).count()
    }
}

impl PortIo for SimPortIo {
    fn inw(&mut self, port: u16) -> u16 {
        self.reads.push(port);
        self.peek(port)
    }

    fn outw(&mut self, port: u16, value: u16) {
        self.writes.push((port, value));
        let old = self.peek(port);
        let new = match self.w1c_masks.get(&port) {
            Some(&mask) => (old & mask & !value) | (value & !mask),
            None => value,
        };
        self.ports.insert(port, new);
    }
}

/// Memory-mapped register file. Unbacked addresses read as zero.
#[derive(Debug, Default)]
pub struct SimMmio {
    regs: BTreeMap<usize, u32>,
    pub writes: Vec<(usize, u32)>,
}

impl SimMmio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reg(mut self, address: usize, value: u32) -> Self {
        self.regs.insert(address, value);
        self
    }
}

impl MmioAccess for SimMmio {
    fn read32(&self, address: usize) -> u32 {
        self.regs.get(&address).copied().unwrap_or(0)
    }

    fn write32(&mut self, address: usize, value: u32) {
        self.writes.push((address, value));
        self.regs.insert(address, value);
    }
}

std::thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records every log message on the emitting thread so parallel tests do not see each other's output.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let message = format!("{}", record.args());
        CAPTURED.with(|logs| logs.borrow_mut().push((record.level(), message)));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Runs `f` and returns its result together with the log records it emitted.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(log::Level, String)>) {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    CAPTURED.with(|logs| logs.borrow_mut().clear());
    let result = f();
    let logs = CAPTURED.with(|logs| logs.take());
    (result, logs)
}
