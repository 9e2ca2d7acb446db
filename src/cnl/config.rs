//! Board Configuration
//!
//! Static per-board configuration attached to PCH devices. Boards describe their devices with a [`DeviceTree`] and
//! attach a [`SocConfig`] to the devices that carry chip settings.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use crate::cnl::access::PciDevFn;

/// Cannon Lake SoC chip settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SocConfig {
    /// GPIO group routed to GPE0 tier DW0.
    pub gpe0_dw0: u8,
    /// GPIO group routed to GPE0 tier DW1.
    pub gpe0_dw1: u8,
    /// GPIO group routed to GPE0 tier DW2.
    pub gpe0_dw2: u8,
}

/// A device described by the board.
#[derive(Debug, Clone, Copy)]
pub struct DeviceNode {
    pub devfn: PciDevFn,
    pub chip_info: Option<&'static SocConfig>,
}

impl DeviceNode {
    pub const fn new(devfn: PciDevFn) -> Self {
        Self { devfn, chip_info: None }
    }

    pub const fn with_chip_info(mut self, chip_info: &'static SocConfig) -> Self {
        self.chip_info = Some(chip_info);
        self
    }
}

/// Board device list.
#[derive(Debug, Clone, Copy)]
pub struct DeviceTree {
    devices: &'static [DeviceNode],
}

impl DeviceTree {
    pub const fn new(devices: &'static [DeviceNode]) -> Self {
        Self { devices }
    }

    /// Finds the device at `devfn`.
    pub fn find(&self, devfn: PciDevFn) -> Option<&'static DeviceNode> {
        self.devices.iter().find(|node| node.devfn == devfn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONFIG: SocConfig = SocConfig { gpe0_dw0: 1, gpe0_dw1: 2, gpe0_dw2: 3 };
    static DEVICES: [DeviceNode; 2] =
        [DeviceNode::new(PciDevFn::new(0, 0x1F, 0)), DeviceNode::new(PciDevFn::new(0, 0x1F, 2)).with_chip_info(&CONFIG)];

    #[test]
    fn find_by_devfn() {
        let tree = DeviceTree::new(&DEVICES);
        assert!(tree.find(PciDevFn::new(0, 0x1F, 0)).is_some_and(|node| node.chip_info.is_none()));
        assert_eq!(tree.find(PciDevFn::new(0, 0x1F, 2)).and_then(|node| node.chip_info), Some(&CONFIG));
        assert!(tree.find(PciDevFn::new(0, 0x1F, 4)).is_none());
    }
}
