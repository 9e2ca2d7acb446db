//! Cannon Lake PMC Base Discovery and SCI Routing
//!
//! Derives the PWRMBASE and TCOBASE register windows from PCI configuration space and decodes how the System
//! Control Interrupt is routed.
//!
//! Neither base is validated. A zero or unprogrammed BAR yields a window at address zero, which only faults when a
//! caller touches registers through it.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use crate::cnl::{
    access::PciConfigAccess,
    registers::{pmc, smbus},
};

/// Base address of the PMC memory-mapped register window. Always 4 KiB aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwrmBase(u32);

impl PwrmBase {
    /// Truncates a raw PWRMBASE register value to its window boundary.
    pub const fn from_raw(raw: u32) -> Self {
        Self(align_down_u32(raw, pmc::PWRMBASE_ALIGN))
    }

    /// Window base as a physical address.
    pub const fn address(self) -> usize {
        self.0 as usize
    }

    /// Address of the register at `offset` within the window.
    pub const fn register(self, offset: usize) -> usize {
        self.address() + offset
    }
}

/// Base I/O port of the TCO register block. Always 32-byte aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcoBase(u16);

impl TcoBase {
    /// Truncates a raw TCOBASE register value to its block boundary.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & !(smbus::TCOBASE_ALIGN - 1))
    }

    /// Block base I/O port.
    pub const fn port(self) -> u16 {
        self.0
    }

    /// I/O port of the register at `offset` within the block.
    pub const fn register(self, offset: u16) -> u16 {
        self.0.wrapping_add(offset)
    }
}

const fn align_down_u32(value: u32, align: u32) -> u32 {
    value & !(align - 1)
}

/// Returns the PMC memory-mapped register window.
pub fn pmc_mmio_regs(pci: &impl PciConfigAccess) -> PwrmBase {
    PwrmBase::from_raw(pci.read_config32(pmc::PCH_DEV_PMC, pmc::PWRMBASE))
}

/// Returns the PMC register window base as an address.
pub fn read_pmc_base(pci: &impl PciConfigAccess) -> usize {
    pmc_mmio_regs(pci).address()
}

/// Returns the TCO register block hosted by the SMBus controller.
pub fn smbus_tco_regs(pci: &impl PciConfigAccess) -> TcoBase {
    TcoBase::from_raw(pci.read_config16(smbus::PCH_DEV_SMBUS, smbus::TCOBASE))
}

/// Maps an `SCI_IRQ_SEL` encoding to its IRQ, or `None` if the encoding is reserved.
pub fn decode_sci_route(scis: u32) -> Option<u8> {
    match scis {
        pmc::SCIS_IRQ9..=pmc::SCIS_IRQ11 => Some((scis - pmc::SCIS_IRQ9 + 9) as u8),
        pmc::SCIS_IRQ20..=pmc::SCIS_IRQ23 => Some((scis - pmc::SCIS_IRQ20 + 20) as u8),
        _ => None,
    }
}

/// Determines the IRQ the SCI is routed to.
///
/// A reserved routing value is reported and treated as IRQ 9.
pub fn acpi_sci_irq(pci: &impl PciConfigAccess) -> u8 {
    let scis = pci.read_config32(pmc::PCH_DEV_PMC, pmc::ACTL) & pmc::SCI_IRQ_SEL;

    let sci_irq = decode_sci_route(scis).unwrap_or_else(|| {
        log::warn!("Invalid SCI route! Defaulting to IRQ9.");
        pmc::SCI_DEFAULT_IRQ
    });

    log::debug!("SCI is IRQ{sci_irq}");
    sci_irq
}
