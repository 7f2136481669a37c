//! # Freeze and unfreeze sequences
//!
//! Freezing a region:
//!
//! 1. Check the register block version.
//! 2. Return early if the region is already frozen. The region must be unfrozen otherwise.
//! 3. Write the freeze request and wait for the freeze acknowledgement.
//! 4. Write the reset request on success, or withdraw the request on failure.
//!
//! Unfreezing a region:
//!
//! 1. Withdraw any pending request.
//! 2. Return early if the region is already unfrozen. The region must be frozen otherwise.
//! 3. Write the unfreeze request and wait for the unfreeze acknowledgement.
//! 4. Withdraw the request, independently of the outcome.
//!
//! Only the freeze sequence checks the version register.
use agilex_freeze::csr::{
    Control, FreezeController as FreezeControllerRegs, MmioFreezeController, OFFICIAL_VERSION,
    SUPPORTED_VERSION, Status, is_version_compatible,
};
use embedded_hal::delay::DelayNs;

use crate::{
    ll::FreezeRegisters,
    poll::{AckError, AckTimeoutError, IllegalRequestError, PollConfig, wait_for_ack},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "unexpected freeze controller version {0:#x}, expected {SUPPORTED_VERSION:#x} or {OFFICIAL_VERSION:#x}"
)]
pub struct IncompatibleVersionError(pub u32);

/// Neither the freeze nor the unfreeze completion flag was set before issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid freeze bridge status {0:#04b} before request")]
pub struct InvalidPriorStateError(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("freeze controller is not ready")]
    NotReady,
    #[error(transparent)]
    IncompatibleVersion(#[from] IncompatibleVersionError),
    #[error(transparent)]
    InvalidPriorState(#[from] InvalidPriorStateError),
    #[error(transparent)]
    IllegalRequest(#[from] IllegalRequestError),
    #[error(transparent)]
    AckTimeout(#[from] AckTimeoutError),
}

impl From<AckError> for Error {
    fn from(err: AckError) -> Self {
        match err {
            AckError::IllegalRequest(e) => Error::IllegalRequest(e),
            AckError::Timeout(e) => Error::AckTimeout(e),
        }
    }
}

impl Error {
    /// A timed out acknowledgement might succeed on a later attempt. All other errors require
    /// intervention.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::AckTimeout(_))
    }
}

/// Decoded status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Frozen,
    Unfrozen,
    /// Both or none of the completion flags are set.
    Transitional(u32),
}

impl RegionState {
    pub const fn from_status(status: Status) -> Self {
        match (status.freeze_done(), status.unfreeze_done()) {
            (true, false) => RegionState::Frozen,
            (false, true) => RegionState::Unfrozen,
            _ => RegionState::Transitional(status.raw_value()),
        }
    }
}

/// Outcome of the first half of a sequence.
pub(crate) enum Started {
    /// The region already is in the requested state. No request was written.
    AlreadyDone,
    RequestWritten,
}

pub(crate) fn check_version<Regs: FreezeRegisters + ?Sized>(
    regs: &mut Regs,
) -> Result<u32, IncompatibleVersionError> {
    let version = regs.read_version();
    if !is_version_compatible(version) {
        log::error!(
            "unexpected freeze controller version {version:#x} != {SUPPORTED_VERSION:#x} != {OFFICIAL_VERSION:#x}"
        );
        return Err(IncompatibleVersionError(version));
    }
    Ok(version)
}

pub(crate) fn start_freeze<Regs: FreezeRegisters + ?Sized>(
    regs: &mut Regs,
) -> Result<Started, Error> {
    check_version(regs)?;
    let status = regs.read_status();
    if status.freeze_done() {
        return Ok(Started::AlreadyDone);
    }
    if !status.unfreeze_done() {
        log::error!(
            "failed to complete the freeze request, status {:#04b}",
            status.raw_value()
        );
        return Err(InvalidPriorStateError(status.raw_value()).into());
    }
    regs.write_control(Control::FREEZE);
    Ok(Started::RequestWritten)
}

pub(crate) fn finish_freeze<Regs: FreezeRegisters + ?Sized>(
    regs: &mut Regs,
    ack: Result<Status, AckError>,
) -> Result<(), Error> {
    match ack {
        Ok(_) => {
            regs.write_control(Control::RESET);
            Ok(())
        }
        Err(e) => {
            regs.write_control(Control::IDLE);
            Err(e.into())
        }
    }
}

pub(crate) fn start_unfreeze<Regs: FreezeRegisters + ?Sized>(
    regs: &mut Regs,
) -> Result<Started, Error> {
    regs.write_control(Control::IDLE);
    let status = regs.read_status();
    if status.unfreeze_done() {
        return Ok(Started::AlreadyDone);
    }
    if !status.freeze_done() {
        log::error!(
            "failed to complete the unfreeze request, status {:#04b}",
            status.raw_value()
        );
        return Err(InvalidPriorStateError(status.raw_value()).into());
    }
    regs.write_control(Control::UNFREEZE);
    Ok(Started::RequestWritten)
}

pub(crate) fn finish_unfreeze<Regs: FreezeRegisters + ?Sized>(
    regs: &mut Regs,
    ack: Result<Status, AckError>,
) -> Result<(), Error> {
    regs.write_control(Control::IDLE);
    ack.map(|_| ()).map_err(Error::from)
}

/// Freeze controller driver.
///
/// The driver can be created without a register block, in which case all operations return
/// [Error::NotReady] until a block was attached with [Self::map].
pub struct FreezeController<Regs, Delay> {
    regs: Option<Regs>,
    delay: Delay,
    config: PollConfig,
}

impl<Regs: FreezeRegisters, Delay> FreezeController<Regs, Delay> {
    /// Create an unmapped driver.
    #[inline]
    pub const fn new(delay: Delay) -> Self {
        Self {
            regs: None,
            delay,
            config: PollConfig::DEFAULT,
        }
    }

    #[inline]
    pub const fn new_mapped(regs: Regs, delay: Delay) -> Self {
        Self {
            regs: Some(regs),
            delay,
            config: PollConfig::DEFAULT,
        }
    }

    #[inline]
    pub fn with_poll_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn set_poll_config(&mut self, config: PollConfig) {
        self.config = config;
    }

    #[inline]
    pub const fn poll_config(&self) -> &PollConfig {
        &self.config
    }

    /// Attach a register block. Returns the previously attached block, if there was one.
    #[inline]
    pub fn map(&mut self, regs: Regs) -> Option<Regs> {
        self.regs.replace(regs)
    }

    #[inline]
    pub fn unmap(&mut self) -> Option<Regs> {
        self.regs.take()
    }

    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.regs.is_some()
    }

    #[inline]
    pub fn release(self) -> (Option<Regs>, Delay) {
        (self.regs, self.delay)
    }

    pub(crate) fn parts(&mut self) -> Result<(&mut Regs, &mut Delay, &PollConfig), Error> {
        match self.regs.as_mut() {
            Some(regs) => Ok((regs, &mut self.delay, &self.config)),
            None => {
                log::error!("freeze controller is not ready");
                Err(Error::NotReady)
            }
        }
    }

    /// Check the version register. [Self::freeze] does this on its own, [Self::unfreeze] does
    /// not.
    pub fn check_version(&mut self) -> Result<u32, Error> {
        let (regs, _, _) = self.parts()?;
        Ok(check_version(regs)?)
    }

    pub fn region_state(&mut self) -> Result<RegionState, Error> {
        let (regs, _, _) = self.parts()?;
        Ok(RegionState::from_status(regs.read_status()))
    }
}

impl<Regs: FreezeRegisters, Delay: DelayNs> FreezeController<Regs, Delay> {
    /// Freeze the region. Freezing an already frozen region is a no-op.
    ///
    /// This blocks for up to `retries * interval` of the [PollConfig].
    pub fn freeze(&mut self) -> Result<(), Error> {
        let (regs, delay, config) = self.parts()?;
        if let Started::AlreadyDone = start_freeze(regs)? {
            return Ok(());
        }
        let ack = wait_for_ack(regs, delay, config, Status::FREEZE_DONE);
        finish_freeze(regs, ack)
    }

    /// Unfreeze the region. Unfreezing an already unfrozen region is a no-op apart from
    /// withdrawing pending requests.
    ///
    /// The version register is not checked.
    pub fn unfreeze(&mut self) -> Result<(), Error> {
        let (regs, delay, config) = self.parts()?;
        if let Started::AlreadyDone = start_unfreeze(regs)? {
            return Ok(());
        }
        let ack = wait_for_ack(regs, delay, config, Status::UNFREEZE_DONE);
        finish_unfreeze(regs, ack)
    }
}

impl<Delay> FreezeController<MmioFreezeController<'static>, Delay> {
    /// Map the register block located at `base_addr`.
    ///
    /// # Safety
    ///
    /// `base_addr` must point to a freeze controller register block which is mapped as device
    /// memory. No other driver may run transactions on the same block concurrently.
    #[inline]
    pub unsafe fn map_at(&mut self, base_addr: usize) -> Option<MmioFreezeController<'static>> {
        self.map(unsafe { FreezeControllerRegs::new_mmio_at(base_addr) })
    }

    /// Create a driver for the freeze controller at the fixed base address.
    ///
    /// # Safety
    ///
    /// This function allows creating an arbitrary amount of drivers for the same register block.
    /// See the [agilex_freeze::csr::FreezeController::new_mmio_fixed_0] docs for more safety
    /// information.
    #[inline]
    pub unsafe fn steal_fixed_0(delay: Delay) -> Self {
        Self::new_mapped(unsafe { FreezeControllerRegs::new_mmio_fixed_0() }, delay)
    }
}
