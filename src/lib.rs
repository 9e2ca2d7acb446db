//! Cannon Lake PCH Resources
//!
//! This crate provides power-management and system-management-interrupt resources for the Intel Cannon Lake
//! Platform Controller Hub, used by early-boot firmware.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
#![no_std]

#[cfg(test)]
extern crate std;

pub mod cnl;
pub mod error;
pub mod serial;

#[cfg(test)]
mod test_support;
