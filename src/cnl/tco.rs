//! TCO Watchdog Status
//!
//! Reads the TCO status registers after a reset and clears the second-timeout latch so the platform does not reset
//! again immediately.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use bitflags::bitflags;

use crate::cnl::{
    access::{PciConfigAccess, PortIo},
    pmc::smbus_tco_regs,
    registers::tco,
    status::{StatusRegister, status_bits},
};

bitflags! {
    /// TCO1_STS register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Tco1Status: u16 {
        const NMI2SMI = 1 << 0;
        const SW_TCO = 1 << 1;
        const TCO_INT = 1 << 2;
        const TIMEOUT = tco::TCO1_STS_TIMEOUT;
        const NEWCENTURY = 1 << 7;
        const BIOSWR = 1 << 8;
        const DMISCI = 1 << 9;
        const DMISMI = 1 << 10;
        const DMISERR = 1 << 12;
        const SLVSEL = 1 << 13;
    }
}

bitflags! {
    /// TCO2_STS register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Tco2Status: u16 {
        const INTRD_DET = 1 << 0;
        const SECOND_TO = tco::TCO2_STS_SECOND_TO;
        const BOOT = 1 << 2;
        const SMLINK_SLV = 1 << 4;
    }
}

/// TCO status snapshot: TCO2_STS in bits 31:16 and TCO1_STS in bits 15:0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcoStatus(u32);

impl TcoStatus {
    /// Combines the two status registers.
    pub const fn new(tco1: u16, tco2: u16) -> Self {
        Self(((tco2 as u32) << 16) | tco1 as u32)
    }

    /// The raw 32-bit status word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn tco1(self) -> Tco1Status {
        Tco1Status::from_bits_retain(self.0 as u16)
    }

    pub fn tco2(self) -> Tco2Status {
        Tco2Status::from_bits_retain((self.0 >> 16) as u16)
    }

    /// `true` if the watchdog expired twice and reset the platform.
    pub fn second_timeout(self) -> bool {
        self.tco2().contains(Tco2Status::SECOND_TO)
    }

    /// Logs the set status bits by name.
    pub fn log(self) {
        let (table, _) = status_bits(StatusRegister::Tco);
        table.log_status(self.0);
    }
}

impl From<TcoStatus> for u32 {
    fn from(status: TcoStatus) -> Self {
        status.raw()
    }
}

/// Returns the TCO status and clears TCO2_STS.SECOND_TO if it was latched.
///
/// TCO1_STS is returned as read and left for the caller to clear. The returned TCO2 half is the value observed
/// before clearing, so a second timeout is still visible to the caller.
pub fn reset_tco_status(pci: &impl PciConfigAccess, io: &mut impl PortIo) -> TcoStatus {
    let tcobase = smbus_tco_regs(pci);

    let tco2_sts = io.inw(tcobase.register(tco::TCO2_STS));
    let clear_second_to = tco2_sts | tco::TCO2_STS_SECOND_TO;
    // Writing SECOND_TO when it is not latched could drop an event raised after the read.
    if tco2_sts & tco::TCO2_STS_SECOND_TO != 0 {
        io.outw(tcobase.register(tco::TCO2_STS), clear_second_to);
    }

    let tco1_sts = io.inw(tcobase.register(tco::TCO1_STS));

    TcoStatus::new(tco1_sts, tco2_sts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnl::registers::smbus;
    use crate::test_support::{SimPci, SimPortIo, capture_logs};

    const TCOBASE: u16 = 0x400;
    const TCO1: u16 = TCOBASE + tco::TCO1_STS;
    const TCO2: u16 = TCOBASE + tco::TCO2_STS;

    fn pci() -> SimPci {
        // Low bits of TCOBASE include the I/O space indicator and must be masked off.
        SimPci::new().with_config16(smbus::PCH_DEV_SMBUS, smbus::TCOBASE, TCOBASE | 0x1)
    }

    #[test]
    fn second_timeout_is_cleared_but_still_reported() {
        let mut io = SimPortIo::new()
            .with_w1c_port(TCO2, tco::TCO2_STS_SECOND_TO | Tco2Status::BOOT.bits(), 0xFFFF)
            .with_w1c_port(TCO1, tco::TCO1_STS_TIMEOUT, 0xFFFF);

        let status = reset_tco_status(&pci(), &mut io);

        assert!(status.second_timeout());
        assert_eq!(status.tco2(), Tco2Status::SECOND_TO | Tco2Status::BOOT);
        assert_eq!(status.raw(), 0x0006_0008);
        // The write also clears every other latched bit that was set in the read value.
        assert_eq!(io.peek(TCO2) & tco::TCO2_STS_SECOND_TO, 0);
        assert_eq!(io.writes, std::vec![(TCO2, 0x0006)]);
    }

    #[test]
    fn tco1_is_not_cleared() {
        let mut io = SimPortIo::new()
            .with_w1c_port(TCO2, tco::TCO2_STS_SECOND_TO, 0xFFFF)
            .with_w1c_port(TCO1, tco::TCO1_STS_TIMEOUT | Tco1Status::NEWCENTURY.bits(), 0xFFFF);

        let status = reset_tco_status(&pci(), &mut io);

        assert_eq!(status.tco1(), Tco1Status::TIMEOUT | Tco1Status::NEWCENTURY);
        assert_eq!(io.peek(TCO1), tco::TCO1_STS_TIMEOUT | Tco1Status::NEWCENTURY.bits());
        assert_eq!(io.writes_to(TCO1), 0);
    }

    #[test]
    fn no_write_when_second_timeout_is_clear() {
        let mut io = SimPortIo::new()
            .with_w1c_port(TCO2, Tco2Status::INTRD_DET.bits(), 0xFFFF)
            .with_w1c_port(TCO1, 0, 0xFFFF);

        let status = reset_tco_status(&pci(), &mut io);

        assert!(!status.second_timeout());
        assert!(io.writes.is_empty());
        assert_eq!(io.peek(TCO2), Tco2Status::INTRD_DET.bits());
        assert_eq!(status.raw(), 0x0001_0000);
    }

    #[test]
    fn registers_are_accessed_in_order() {
        let mut io = SimPortIo::new().with_w1c_port(TCO2, tco::TCO2_STS_SECOND_TO, 0xFFFF).with_port(TCO1, 0);

        reset_tco_status(&pci(), &mut io);

        assert_eq!(io.reads, std::vec![TCO2, TCO1]);
        assert_eq!(io.writes_to(TCO2), 1);
    }

    #[test]
    fn status_log_names_set_bits() {
        let status = TcoStatus::new(tco::TCO1_STS_TIMEOUT, tco::TCO2_STS_SECOND_TO);
        let ((), logs) = capture_logs(|| status.log());
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].1, "TCO_STS: TIMEOUT SECOND_TO");
        assert_eq!(u32::from(status), 0x0002_0008);
    }
}
