//! Region level API for bitstream loaders.
//!
//! A loader which performs partial reconfiguration only needs to freeze a region before writing
//! the bitstream and unfreeze it afterwards. These traits allow writing such loaders generically
//! over the freeze controller driver.
use crate::{
    freeze::{Error, FreezeController},
    ll::FreezeRegisters,
};

pub trait FreezeRegion {
    fn freeze(&mut self) -> Result<(), Error>;
    fn unfreeze(&mut self) -> Result<(), Error>;
}

#[allow(async_fn_in_trait)]
pub trait FreezeRegionAsync {
    async fn freeze(&mut self) -> Result<(), Error>;
    async fn unfreeze(&mut self) -> Result<(), Error>;
}

impl<T: FreezeRegion + ?Sized> FreezeRegion for &mut T {
    #[inline]
    fn freeze(&mut self) -> Result<(), Error> {
        T::freeze(self)
    }

    #[inline]
    fn unfreeze(&mut self) -> Result<(), Error> {
        T::unfreeze(self)
    }
}

impl<Regs: FreezeRegisters, Delay: embedded_hal::delay::DelayNs> FreezeRegion
    for FreezeController<Regs, Delay>
{
    #[inline]
    fn freeze(&mut self) -> Result<(), Error> {
        FreezeController::freeze(self)
    }

    #[inline]
    fn unfreeze(&mut self) -> Result<(), Error> {
        FreezeController::unfreeze(self)
    }
}

impl<Regs: FreezeRegisters, Delay: embedded_hal_async::delay::DelayNs> FreezeRegionAsync
    for FreezeController<Regs, Delay>
{
    #[inline]
    async fn freeze(&mut self) -> Result<(), Error> {
        self.freeze_async().await
    }

    #[inline]
    async fn unfreeze(&mut self) -> Result<(), Error> {
        self.unfreeze_async().await
    }
}

/// Freeze the region controlled by `region`. Returns [Error::NotReady] if no freeze controller
/// is available.
pub fn freeze_region<R: FreezeRegion + ?Sized>(region: Option<&mut R>) -> Result<(), Error> {
    match region {
        Some(region) => region.freeze(),
        None => Err(Error::NotReady),
    }
}

/// Unfreeze the region controlled by `region`. Returns [Error::NotReady] if no freeze controller
/// is available.
pub fn unfreeze_region<R: FreezeRegion + ?Sized>(region: Option<&mut R>) -> Result<(), Error> {
    match region {
        Some(region) => region.unfreeze(),
        None => Err(Error::NotReady),
    }
}
