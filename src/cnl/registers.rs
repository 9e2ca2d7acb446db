//! Cannon Lake PCH Registers
//!
//! This module defines constants for Cannon Lake PCH register offsets and masks, including the PCI Express
//! enhanced configuration base address, the Power Management Controller (PMC) and the SMBus controller hosting the
//! TCO watchdog block.
//!
//! ## References
//!
//! - [Intel 300 Series Chipset Family PCH Datasheet, Volume 2](https://www.intel.com/content/www/us/en/content-details/337348/intel-300-series-chipset-family-platform-controller-hub-pch-datasheet-volume-2.html)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use crate::cnl::access::PciDevFn;

/// Base address for PCI Express enhanced configuration (ECAM)
pub const PCI_EXPRESS_BASE_ADDRESS: u64 = 0xE0000000;

/// Size of one KiB, used for alignment constants.
pub const KIB: u32 = 1024;

/// Power Management Controller (PMC) registers, device 0:1f.2
pub mod pmc {
    use super::{KIB, PciDevFn};

    /// PMC PCI device
    pub const PCH_DEV_PMC: PciDevFn = PciDevFn::new(0, 0x1F, 2);
    /// ACPI Control register offset
    pub const ACTL: u16 = 0x44;
    /// SCI IRQ select field (ACTL bits 2:0)
    pub const SCI_IRQ_SEL: u32 = 0x7;
    /// SCI routed to IRQ 9
    pub const SCIS_IRQ9: u32 = 0;
    /// SCI routed to IRQ 10
    pub const SCIS_IRQ10: u32 = 1;
    /// SCI routed to IRQ 11
    pub const SCIS_IRQ11: u32 = 2;
    /// SCI routed to IRQ 20
    pub const SCIS_IRQ20: u32 = 4;
    /// SCI routed to IRQ 21
    pub const SCIS_IRQ21: u32 = 5;
    /// SCI routed to IRQ 22
    pub const SCIS_IRQ22: u32 = 6;
    /// SCI routed to IRQ 23
    pub const SCIS_IRQ23: u32 = 7;
    /// IRQ used when the SCI route is not a valid encoding
    pub const SCI_DEFAULT_IRQ: u8 = 9;
    /// PM Base Address (PWRMBASE) register offset
    pub const PWRMBASE: u16 = 0x48;
    /// PWRMBASE window alignment
    pub const PWRMBASE_ALIGN: u32 = 4 * KIB;
    /// GPIO GPE routing register offset (from PWRMBASE)
    pub const GPIO_CFG: usize = 0x1920;
    /// Width of one GPE0 tier field in GPIO_CFG
    pub const GPE0_DWX_MASK: u32 = 0xF;

    /// Bit position of the GPE0 tier `dw` field in GPIO_CFG.
    pub const fn gpe0_dw_shift(dw: u32) -> u32 {
        4 * dw
    }
}

/// SMBus controller registers, device 0:1f.4
pub mod smbus {
    use super::PciDevFn;

    /// SMBus PCI device
    pub const PCH_DEV_SMBUS: PciDevFn = PciDevFn::new(0, 0x1F, 4);
    /// TCO Base Address register offset
    pub const TCOBASE: u16 = 0x50;
    /// TCOBASE window alignment
    pub const TCOBASE_ALIGN: u16 = 0x20;
}

/// TCO watchdog I/O registers (offsets from TCOBASE)
pub mod tco {
    /// TCO1 Status offset
    pub const TCO1_STS: u16 = 0x04;
    /// TCO2 Status offset
    pub const TCO2_STS: u16 = 0x06;
    /// TCO1 timer timeout bit
    pub const TCO1_STS_TIMEOUT: u16 = 1 << 3;
    /// TCO2 second timeout bit
    pub const TCO2_STS_SECOND_TO: u16 = 1 << 1;
}
