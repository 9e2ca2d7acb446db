//! Status Bit Names
//!
//! Symbolic names for the bits of the SMI, TCO and GPE0 status registers, used to render human-readable reasons
//! for an SMI or wake event. The tables are sparse: reserved bits have no entry and look up as `None`.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use core::fmt;

/// Status register classes with a name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRegister {
    /// SMI_STS in the ACPI I/O block.
    Smi,
    /// TCO1_STS (bits 15:0) and TCO2_STS (bits 31:16) combined.
    Tco,
    /// GPE0_STS standard (non-GPIO) events.
    Gpe0,
}

/// Sparse mapping from status bit index to a mnemonic.
#[derive(Debug)]
pub struct StatusBitTable {
    label: &'static str,
    entries: &'static [(u8, &'static str)],
    size: usize,
}

impl StatusBitTable {
    /// Creates a table from `entries`, which must be sorted by bit index.
    ///
    /// The logical size is the highest defined index plus one.
    const fn new(label: &'static str, entries: &'static [(u8, &'static str)]) -> Self {
        let mut size = 0;
        let mut i = 0;
        while i < entries.len() {
            let next = entries[i].0 as usize + 1;
            if next > size {
                size = next;
            }
            i += 1;
        }
        Self { label, entries, size }
    }

    /// Register label used when logging, e.g. `SMI_STS`.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Logical size of the table, counting reserved gaps.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the table defines no bits.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Name of `bit`, or `None` for reserved and out-of-range bits.
    pub fn name(&self, bit: usize) -> Option<&'static str> {
        let bit = u8::try_from(bit).ok()?;
        self.entries.binary_search_by_key(&bit, |&(index, _)| index).ok().map(|i| self.entries[i].1)
    }

    /// Index of the bit called `name`.
    pub fn bit_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|(_, n)| *n == name).map(|&(index, _)| index as usize)
    }

    /// Named bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.entries.iter().map(|&(index, name)| (index as usize, name))
    }

    /// Set bits of `status`, each paired with its name if it has one.
    pub fn set_bits(&self, status: u32) -> impl Iterator<Item = (usize, Option<&'static str>)> + '_ {
        (0..u32::BITS as usize).filter(move |bit| status & (1 << bit) != 0).map(move |bit| (bit, self.name(bit)))
    }

    /// Display adapter listing the set bits of `status` by name.
    pub fn describe(&self, status: u32) -> StatusNames<'_> {
        StatusNames { table: self, status }
    }

    /// Logs the set bits of `status` at debug level.
    pub fn log_status(&self, status: u32) {
        if status == 0 {
            return;
        }
        log::debug!("{}: {}", self.label, self.describe(status));
    }
}

/// Space separated names of the set bits in a status word. Unnamed bits render as `BIT<n>`.
#[derive(Debug)]
pub struct StatusNames<'a> {
    table: &'a StatusBitTable,
    status: u32,
}

impl fmt::Display for StatusNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (bit, name) in self.table.set_bits(self.status) {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match name {
                Some(name) => f.write_str(name)?,
                None => write!(f, "BIT{bit}")?,
            }
        }
        Ok(())
    }
}

static SMI_STS_BITS: StatusBitTable = StatusBitTable::new(
    "SMI_STS",
    &[
        (2, "BIOS"),
        (3, "LEGACY_USB"),
        (4, "SLP_SMI"),
        (5, "APM"),
        (6, "SWSMI_TMR"),
        (8, "PM1"),
        (9, "GPE0"),
        (10, "GPI"),
        (11, "MCSMI"),
        (12, "DEVMON"),
        (13, "TCO"),
        (14, "PERIODIC"),
        (15, "SERIRQ_SMI"),
        (16, "SMBUS_SMI"),
        (20, "PCI_EXP_SMI"),
        (21, "MONITOR"),
        (26, "SPI"),
        (27, "GPIO_UNLOCK"),
        (28, "ESPI_SMI"),
    ],
);

static TCO_STS_BITS: StatusBitTable = StatusBitTable::new(
    "TCO_STS",
    &[
        (0, "NMI2SMI"),
        (1, "SW_TCO"),
        (2, "TCO_INT"),
        (3, "TIMEOUT"),
        (7, "NEWCENTURY"),
        (8, "BIOSWR"),
        (9, "DMISCI"),
        (10, "DMISMI"),
        (12, "DMISERR"),
        (13, "SLVSEL"),
        (16, "INTRD_DET"),
        (17, "SECOND_TO"),
        (18, "BOOT"),
        (20, "SMLINK_SLV"),
    ],
);

static GPE0_STS_BITS: StatusBitTable = StatusBitTable::new(
    "GPE0_STS",
    &[
        (1, "HOTPLUG"),
        (2, "SWGPE"),
        (6, "TCO_SCI"),
        (7, "SMB_WAK"),
        (9, "PCI_EXP"),
        (10, "BATLOW"),
        (11, "PME"),
        (12, "ME"),
        (13, "PME_B0"),
        (14, "eSPI"),
        (15, "GPIO Tier-2"),
        (16, "LAN_WAKE"),
        (18, "WADT"),
    ],
);

/// Returns the name table for `register` together with its logical size.
pub fn status_bits(register: StatusRegister) -> (&'static StatusBitTable, usize) {
    let table = match register {
        StatusRegister::Smi => &SMI_STS_BITS,
        StatusRegister::Tco => &TCO_STS_BITS,
        StatusRegister::Gpe0 => &GPE0_STS_BITS,
    };
    (table, table.len())
}
