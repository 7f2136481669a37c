//! Asynchronous freeze and unfreeze.
//!
//! The register sequences are identical to the blocking ones in [crate::freeze]. The only
//! difference is that the poll interval is awaited using an
//! [embedded_hal_async::delay::DelayNs] implementation, which allows other tasks to run while
//! waiting for an acknowledgement.
//!
//! Dropping one of the returned futures while it is waiting for the acknowledgement leaves the
//! request bit asserted. Run [FreezeController::unfreeze_async] or
//! [FreezeController::freeze_async] to completion before dropping them.
use agilex_freeze::csr::Status;
use embedded_hal_async::delay::DelayNs;

use crate::{
    freeze::{
        Error, FreezeController, Started, finish_freeze, finish_unfreeze, start_freeze,
        start_unfreeze,
    },
    ll::FreezeRegisters,
    poll::wait_for_ack_async,
};

impl<Regs: FreezeRegisters, Delay: DelayNs> FreezeController<Regs, Delay> {
    /// Asynchronous variant of [FreezeController::freeze].
    pub async fn freeze_async(&mut self) -> Result<(), Error> {
        let (regs, delay, config) = self.parts()?;
        if let Started::AlreadyDone = start_freeze(regs)? {
            return Ok(());
        }
        let ack = wait_for_ack_async(regs, delay, config, Status::FREEZE_DONE).await;
        finish_freeze(regs, ack)
    }

    /// Asynchronous variant of [FreezeController::unfreeze]. The version register is not
    /// checked.
    pub async fn unfreeze_async(&mut self) -> Result<(), Error> {
        let (regs, delay, config) = self.parts()?;
        if let Started::AlreadyDone = start_unfreeze(regs)? {
            return Ok(());
        }
        let ack = wait_for_ack_async(regs, delay, config, Status::UNFREEZE_DONE).await;
        finish_unfreeze(regs, ack)
    }
}
