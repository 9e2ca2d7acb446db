//! Register Access Capabilities
//!
//! Narrow capability traits for PCI configuration space, port-mapped I/O and memory-mapped I/O, plus the hardware
//! implementations used on real platforms. Decoding logic in this crate only talks to these traits so it can run
//! against a simulated register file.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use core::fmt;

/// PCI bus/device/function address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PciDevFn {
    /// Bus number (0-255).
    pub bus: u8,
    /// Device number (0-31).
    pub device: u8,
    /// Function number (0-7).
    pub function: u8,
}

impl PciDevFn {
    /// Creates a new PCI address.
    pub const fn new(bus: u8, device: u8, function: u8) -> Self {
        Self { bus, device, function }
    }

    /// Returns the byte offset of `register` within an ECAM window.
    pub const fn ecam_offset(&self, register: u16) -> usize {
        ((self.bus as usize) << 20)
            | (((self.device & 0x1F) as usize) << 15)
            | (((self.function & 0x7) as usize) << 12)
            | ((register & 0xFFF) as usize)
    }
}

impl fmt::Display for PciDevFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}.{}", self.bus, self.device, self.function)
    }
}

/// Read access to PCI configuration space.
pub trait PciConfigAccess {
    /// Reads a 16-bit configuration field.
    fn read_config16(&self, dev: PciDevFn, offset: u16) -> u16;
    /// Reads a 32-bit configuration field.
    fn read_config32(&self, dev: PciDevFn, offset: u16) -> u32;
}

/// 16-bit port-mapped I/O.
pub trait PortIo {
    /// Reads a word from `port`.
    fn inw(&mut self, port: u16) -> u16;
    /// Writes a word to `port`.
    fn outw(&mut self, port: u16, value: u16);
}

/// 32-bit memory-mapped I/O.
pub trait MmioAccess {
    /// Reads a dword at `address`.
    fn read32(&self, address: usize) -> u32;
    /// Writes a dword at `address`.
    fn write32(&mut self, address: usize, value: u32);
}

/// PCI configuration access through the memory-mapped enhanced configuration window.
#[derive(Debug)]
pub struct EcamAccess {
    base: usize,
}

impl EcamAccess {
    /// Creates an ECAM accessor for the window at `base`.
    ///
    /// # Safety
    /// `base` must be the mapped PCI Express enhanced configuration window of the platform. Every configuration read
    /// through this accessor dereferences memory inside that window.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }
}

impl PciConfigAccess for EcamAccess {
    fn read_config16(&self, dev: PciDevFn, offset: u16) -> u16 {
        let reg = (self.base + dev.ecam_offset(offset)) as *const u16;
        // SAFETY: the window was validated when this accessor was constructed.
        unsafe { core::ptr::read_volatile(reg) }
    }

    fn read_config32(&self, dev: PciDevFn, offset: u16) -> u32 {
        let reg = (self.base + dev.ecam_offset(offset)) as *const u32;
        // SAFETY: the window was validated when this accessor was constructed.
        unsafe { core::ptr::read_volatile(reg) }
    }
}

/// Memory-mapped register access through volatile pointer reads and writes.
#[derive(Debug)]
pub struct VolatileMmio {
    _private: (),
}

impl VolatileMmio {
    /// Creates a volatile MMIO accessor.
    ///
    /// # Safety
    /// Every address later passed to [`MmioAccess`] methods must be a mapped, 4-byte aligned device register.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MmioAccess for VolatileMmio {
    fn read32(&self, address: usize) -> u32 {
        // SAFETY: guaranteed by the constructor contract.
        unsafe { core::ptr::read_volatile(address as *const u32) }
    }

    fn write32(&mut self, address: usize, value: u32) {
        // SAFETY: guaranteed by the constructor contract.
        unsafe { core::ptr::write_volatile(address as *mut u32, value) }
    }
}

/// x86 `in`/`out` instruction port I/O.
#[cfg(all(target_arch = "x86_64", feature = "x64"))]
#[derive(Debug)]
pub struct X86PortIo {
    _private: (),
}

#[cfg(all(target_arch = "x86_64", feature = "x64"))]
impl X86PortIo {
    /// Creates a port I/O accessor.
    ///
    /// # Safety
    /// The caller must be running at an I/O privilege level that permits port access, and must only pass ports that
    /// belong to devices it owns.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(all(target_arch = "x86_64", feature = "x64"))]
impl PortIo for X86PortIo {
    fn inw(&mut self, port: u16) -> u16 {
        let mut port = x86_64::instructions::port::Port::<u16>::new(port);
        // SAFETY: guaranteed by the constructor contract.
        unsafe { port.read() }
    }

    fn outw(&mut self, port: u16, value: u16) {
        let mut port = x86_64::instructions::port::Port::<u16>::new(port);
        // SAFETY: guaranteed by the constructor contract.
        unsafe { port.write(value) }
    }
}
