//! # PAC for the Intel Agilex freeze controller
//!
//! The freeze controller sits between the static fabric and a partially reconfigurable (PR)
//! region. While a region is frozen, its outputs are held in a safe state so that a new
//! bitstream can be loaded into it. The controller exposes a small block of control and status
//! registers (CSR) which is described in [csr].
//!
//! This crate only provides raw register access. The request and acknowledgement protocol is
//! implemented by the `agilex-freeze-hal` crate.
#![no_std]

pub mod csr;

pub use csr::{Control, FreezeController, MmioFreezeController, Status};
