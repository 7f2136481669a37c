//! Acknowledgement poller.
//!
//! After a request bit was written, the hardware signals completion by setting a bit in the
//! status register. The poller checks the illegal request register first on every attempt, then
//! the status register, and waits for the configured interval before the next attempt.
use agilex_freeze::csr::Status;
use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as DelayNsAsync;
use fugit::MicrosDurationU32;

use crate::ll::FreezeRegisters;

pub const DEFAULT_RETRIES: u32 = 10;
pub const DEFAULT_INTERVAL: MicrosDurationU32 = MicrosDurationU32::millis(1000);

/// Retry budget for a single acknowledgement.
///
/// The worst case time spent waiting for an acknowledgement is `retries * interval`.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    retries: u32,
    interval: MicrosDurationU32,
}

impl PollConfig {
    pub const DEFAULT: Self = Self::new(DEFAULT_RETRIES, DEFAULT_INTERVAL);

    /// A retry count of 0 is treated like 1: the status is always checked at least once.
    #[inline]
    pub const fn new(retries: u32, interval: MicrosDurationU32) -> Self {
        Self { retries, interval }
    }

    #[inline]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    #[inline]
    pub const fn interval(&self) -> MicrosDurationU32 {
        self.interval
    }

    /// Number of status checks performed before giving up.
    #[inline]
    pub const fn attempts(&self) -> u32 {
        if self.retries == 0 { 1 } else { self.retries }
    }

    /// Worst case time spent waiting for one acknowledgement, in microseconds.
    #[inline]
    pub const fn max_wait_us(&self) -> u64 {
        self.attempts() as u64 * self.interval().to_micros() as u64
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The hardware flagged an illegal request sequence.
///
/// The flags were written back once to clear them. `residual` contains the flags which were
/// still set afterwards and is 0 if clearing worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal request {value:#010x} detected in freeze bridge")]
pub struct IllegalRequestError {
    pub value: u32,
    pub residual: u32,
}

impl IllegalRequestError {
    #[inline]
    pub const fn cleared(&self) -> bool {
        self.residual == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request not acknowledged after {attempts} attempts")]
pub struct AckTimeoutError {
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AckError {
    #[error(transparent)]
    IllegalRequest(#[from] IllegalRequestError),
    #[error(transparent)]
    Timeout(#[from] AckTimeoutError),
}

/// Single poll attempt. Returns the acknowledged status bits, or [None] if none of the bits in
/// `ack_mask` are set yet.
fn poll_once<Regs: FreezeRegisters + ?Sized>(
    regs: &mut Regs,
    ack_mask: Status,
) -> Result<Option<Status>, IllegalRequestError> {
    let illegal = regs.read_illegal_request();
    if illegal != 0 {
        log::error!("illegal request {illegal:#010x} detected in freeze bridge");
        regs.write_illegal_request(illegal);
        let residual = regs.read_illegal_request();
        if residual != 0 {
            log::error!("illegal request {residual:#010x} in freeze bridge was not cleared");
        }
        return Err(IllegalRequestError {
            value: illegal,
            residual,
        });
    }
    let acked = regs.read_status().masked(ack_mask);
    if acked.is_empty() {
        return Ok(None);
    }
    // The control register is read on every acknowledgement, independently of the log level.
    let ctrl = regs.read_control();
    log::debug!(
        "request {:#x} acknowledged, status {:#x}, control {:#x}",
        ack_mask.raw_value(),
        acked.raw_value(),
        ctrl.raw_value()
    );
    Ok(Some(acked))
}

fn timeout(config: &PollConfig, ack_mask: Status) -> AckError {
    log::warn!(
        "freeze bridge request {:#x} not acknowledged within {} us",
        ack_mask.raw_value(),
        config.max_wait_us()
    );
    AckTimeoutError {
        attempts: config.attempts(),
    }
    .into()
}

/// Wait until any of the status bits in `ack_mask` is set.
///
/// An illegal request terminates the wait immediately, even if the acknowledgement bit is set as
/// well. This function never writes the control register.
pub fn wait_for_ack<Regs: FreezeRegisters + ?Sized, Delay: DelayNs + ?Sized>(
    regs: &mut Regs,
    delay: &mut Delay,
    config: &PollConfig,
    ack_mask: Status,
) -> Result<Status, AckError> {
    for _ in 0..config.attempts() {
        if let Some(acked) = poll_once(regs, ack_mask)? {
            return Ok(acked);
        }
        delay.delay_us(config.interval().to_micros());
    }
    Err(timeout(config, ack_mask))
}

/// Asynchronous variant of [wait_for_ack]. The register sequence is identical.
///
/// Dropping the returned future stops polling but does not withdraw the pending request.
pub async fn wait_for_ack_async<Regs: FreezeRegisters + ?Sized, Delay: DelayNsAsync + ?Sized>(
    regs: &mut Regs,
    delay: &mut Delay,
    config: &PollConfig,
    ack_mask: Status,
) -> Result<Status, AckError> {
    for _ in 0..config.attempts() {
        if let Some(acked) = poll_once(regs, ack_mask)? {
            return Ok(acked);
        }
        delay.delay_us(config.interval().to_micros()).await;
    }
    Err(timeout(config, ack_mask))
}
