//! SGX Lifecycle Hooks
//!
//! CPU-specific code implements [`SgxLifecycle`] for each core. PRMRR must be configured on every core before SGX is
//! configured on any core; [`bring_up_sgx`] drives the hooks in that order.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

/// Per-core SGX hooks provided by CPU-specific code.
pub trait SgxLifecycle {
    /// Locks SGX memory.
    fn cpu_lock_sgx_memory(&mut self);

    /// Configures the core PRMRR.
    fn prmrr_core_configure(&mut self);

    /// Configures SGX on the core. PRMRR must already be configured on all cores.
    fn sgx_configure(&mut self);
}

/// Configures PRMRR on every core, then SGX on every core, then locks SGX memory once on the first core.
pub fn bring_up_sgx<C: SgxLifecycle>(cores: &mut [C]) {
    log::debug!("Configuring PRMRR on {} cores", cores.len());
    for core in cores.iter_mut() {
        core.prmrr_core_configure();
    }

    for core in cores.iter_mut() {
        core.sgx_configure();
    }

    if let Some(bsp) = cores.first_mut() {
        bsp.cpu_lock_sgx_memory();
    }
}
