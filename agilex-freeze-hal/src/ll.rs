//! Low-level register access.
//!
//! The protocol only talks to the hardware through [FreezeRegisters]. Every call is exactly one
//! volatile register access and must not be reordered, merged or skipped by an implementation.
use agilex_freeze::csr::{Control, MmioFreezeController, Status};

pub trait FreezeRegisters {
    fn read_status(&mut self) -> Status;
    fn read_control(&mut self) -> Control;
    fn write_control(&mut self, value: Control);
    fn read_illegal_request(&mut self) -> u32;
    /// Write-1-to-clear.
    fn write_illegal_request(&mut self, value: u32);
    fn read_version(&mut self) -> u32;
}

impl FreezeRegisters for MmioFreezeController<'_> {
    #[inline]
    fn read_status(&mut self) -> Status {
        MmioFreezeController::read_status(self)
    }

    #[inline]
    fn read_control(&mut self) -> Control {
        MmioFreezeController::read_control(self)
    }

    #[inline]
    fn write_control(&mut self, value: Control) {
        MmioFreezeController::write_control(self, value)
    }

    #[inline]
    fn read_illegal_request(&mut self) -> u32 {
        MmioFreezeController::read_illegal_request(self)
    }

    #[inline]
    fn write_illegal_request(&mut self, value: u32) {
        MmioFreezeController::write_illegal_request(self, value)
    }

    #[inline]
    fn read_version(&mut self) -> u32 {
        MmioFreezeController::read_version(self)
    }
}

impl<R: FreezeRegisters + ?Sized> FreezeRegisters for &mut R {
    #[inline]
    fn read_status(&mut self) -> Status {
        R::read_status(self)
    }

    #[inline]
    fn read_control(&mut self) -> Control {
        R::read_control(self)
    }

    #[inline]
    fn write_control(&mut self, value: Control) {
        R::write_control(self, value)
    }

    #[inline]
    fn read_illegal_request(&mut self) -> u32 {
        R::read_illegal_request(self)
    }

    #[inline]
    fn write_illegal_request(&mut self, value: u32) {
        R::write_illegal_request(self, value)
    }

    #[inline]
    fn read_version(&mut self) -> u32 {
        R::read_version(self)
    }
}
