//! # HAL for the Intel Agilex freeze controller
//!
//! This crate implements the freeze and unfreeze handshake on top of the
//! [peripheral access API](agilex_freeze) of the freeze controller. A partially reconfigurable
//! region must be frozen before a new bitstream is written into it, and unfrozen after the
//! configuration completed.
//!
//! Both a blocking API, using [embedded_hal::delay::DelayNs] between polls, and an asynchronous
//! API, using [embedded_hal_async::delay::DelayNs], are provided by [FreezeController].
//!
//! ## Concurrency
//!
//! The driver does not lock anything internally. One [FreezeController] serializes its own
//! transactions because all operations require `&mut self`. If multiple drivers are created for
//! the same register block, for example with [FreezeController::steal_fixed_0], the user must
//! ensure that at most one freeze or unfreeze transaction is in flight per register block.
#![no_std]

pub mod asynch;
pub mod freeze;
pub mod ll;
pub mod poll;
pub mod region;

#[cfg(test)]
pub(crate) mod sim;

pub use freeze::{Error, FreezeController, RegionState};
pub use ll::FreezeRegisters;
pub use poll::PollConfig;
pub use region::{FreezeRegion, FreezeRegionAsync, freeze_region, unfreeze_region};
