//! Cannon Lake PM Report Application
//!
//! Prints the SCI routing, the PMC and TCO register windows and the reason for the last watchdog reset, then
//! programs GPE tier routing from the board configuration.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
#![cfg(all(target_os = "uefi", feature = "x64"))]
#![no_std]
#![no_main]

use core::panic::PanicInfo;
use pch_resources::{
    cnl::{
        access::{EcamAccess, PciDevFn, VolatileMmio, X86PortIo},
        config::{DeviceNode, DeviceTree, SocConfig},
        gpe, pmc,
        registers::{self, pmc::PCH_DEV_PMC},
        tco,
    },
    serial::{SerialLogger, Uart16550},
};
use r_efi::efi;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("{}", info);
    loop {}
}

static LOGGER: SerialLogger<Uart16550> = SerialLogger::new(Uart16550::new(0x3F8), log::LevelFilter::Debug);

///
///  Board configuration
///
static SOC_CONFIG: SocConfig = SocConfig { gpe0_dw0: 0x0, gpe0_dw1: 0x1, gpe0_dw2: 0x2 };

static BOARD_DEVICES: [DeviceNode; 2] =
    [DeviceNode::new(PciDevFn::new(0, 0, 0)), DeviceNode::new(PCH_DEV_PMC).with_chip_info(&SOC_CONFIG)];

#[cfg_attr(target_os = "uefi", unsafe(export_name = "efi_main"))]
pub extern "efiapi" fn _start(_image_handle: efi::Handle, _system_table: *mut efi::SystemTable) -> efi::Status {
    if log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Trace)).is_err() {
        return efi::Status::ALREADY_STARTED;
    }

    log::info!("Cannon Lake PM Report v{}", env!("CARGO_PKG_VERSION"));

    // SAFETY: firmware maps the ECAM window at the platform's configured base.
    let pci = unsafe { EcamAccess::new(registers::PCI_EXPRESS_BASE_ADDRESS as usize) };
    // SAFETY: UEFI applications run at ring 0 with port access.
    let mut io = unsafe { X86PortIo::new() };
    // SAFETY: only PMC registers inside PWRMBASE are accessed.
    let mut mmio = unsafe { VolatileMmio::new() };

    pmc::acpi_sci_irq(&pci);

    let pwrmbase = pmc::pmc_mmio_regs(&pci);
    log::info!("PWRMBASE: {:#X}", pwrmbase.address());
    log::info!("TCOBASE: {:#X}", pmc::smbus_tco_regs(&pci).port());

    let tco_status = tco::reset_tco_status(&pci, &mut io);
    log::info!("TCO status: {:#010X}", tco_status.raw());
    tco_status.log();
    if tco_status.second_timeout() {
        log::warn!("Last reset was caused by a TCO watchdog second timeout");
    }

    match gpe::soc_get_gpe_configs(&DeviceTree::new(&BOARD_DEVICES)) {
        Ok(config) => gpe::program_gpe_routing(pwrmbase, &mut mmio, &config),
        Err(err) => log::error!("GPE routing left at reset defaults: {err}"),
    }

    efi::Status::SUCCESS
}
