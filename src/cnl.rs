//! Cannon Lake PCH Resources
//!
//! Register discovery, status decoding and board configuration for the Cannon Lake PCH.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
pub mod access;
pub mod config;
pub mod gpe;
pub mod pmc;
pub mod registers;
pub mod sgx;
pub mod status;
pub mod tco;
