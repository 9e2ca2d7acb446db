//! GPE Tier Configuration
//!
//! Reports which GPIO groups the board routes to the three GPE0 tiers and programs that routing into the PMC.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use crate::{
    cnl::{
        access::MmioAccess,
        config::DeviceTree,
        pmc::PwrmBase,
        registers::pmc,
    },
    error::{PmcError, Result},
};

/// GPIO group assigned to each GPE0 tier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GpeConfig {
    pub dw0: u8,
    pub dw1: u8,
    pub dw2: u8,
}

impl GpeConfig {
    /// GPIO_CFG register value routing the three tiers.
    pub fn gpio_cfg(&self) -> u32 {
        (u32::from(self.dw0) & pmc::GPE0_DWX_MASK) << pmc::gpe0_dw_shift(0)
            | (u32::from(self.dw1) & pmc::GPE0_DWX_MASK) << pmc::gpe0_dw_shift(1)
            | (u32::from(self.dw2) & pmc::GPE0_DWX_MASK) << pmc::gpe0_dw_shift(2)
    }

    /// `true` if two tiers are routed to the same GPIO group.
    pub fn has_duplicate_tiers(&self) -> bool {
        self.dw0 == self.dw1 || self.dw1 == self.dw2 || self.dw0 == self.dw2
    }
}

/// Looks up the GPE tier assignment from the PMC's board configuration.
///
/// A missing PMC device or chip configuration is a board bug. It is logged and no assignment is produced.
pub fn soc_get_gpe_configs(tree: &DeviceTree) -> Result<GpeConfig> {
    let dev = pmc::PCH_DEV_PMC;
    let config = tree
        .find(dev)
        .ok_or(PmcError::MissingDevice(dev))
        .and_then(|node| node.chip_info.ok_or(PmcError::MissingChipInfo(dev)))
        .inspect_err(|err| log::error!("BUG! Could not find SOC devicetree config: {err}"))?;

    Ok(GpeConfig { dw0: config.gpe0_dw0, dw1: config.gpe0_dw1, dw2: config.gpe0_dw2 })
}

/// Programs the GPE tier routing into the PMC GPIO_CFG register.
///
/// Bits outside the three tier fields are preserved. A routing that maps two tiers to the same GPIO group is
/// rejected and GPIO_CFG keeps its reset routing.
pub fn program_gpe_routing(pwrmbase: PwrmBase, mmio: &mut impl MmioAccess, config: &GpeConfig) {
    if config.has_duplicate_tiers() {
        log::error!("GPE tiers share a GPIO group, keeping reset routing: {config:?}");
        return;
    }

    let fields_mask = (pmc::GPE0_DWX_MASK << pmc::gpe0_dw_shift(0))
        | (pmc::GPE0_DWX_MASK << pmc::gpe0_dw_shift(1))
        | (pmc::GPE0_DWX_MASK << pmc::gpe0_dw_shift(2));

    let address = pwrmbase.register(pmc::GPIO_CFG);
    let gpio_cfg = (mmio.read32(address) & !fields_mask) | config.gpio_cfg();
    log::debug!("GPIO_CFG @ {address:#X} = {gpio_cfg:#X}");
    mmio.write32(address, gpio_cfg);
}
