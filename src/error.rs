//! Error Types
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use thiserror::Error;

use crate::cnl::access::PciDevFn;

/// Errors reported by board configuration lookups.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum PmcError {
    /// The board does not describe the device.
    #[error("device {0} not found in devicetree")]
    MissingDevice(PciDevFn),
    /// The device is described but carries no chip configuration.
    #[error("device {0} has no chip configuration")]
    MissingChipInfo(PciDevFn),
}

pub type Result<T> = core::result::Result<T, PmcError>;
