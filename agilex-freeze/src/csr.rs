//! # Freeze controller CSR block
//!
//! | Offset | Register        | Access                  |
//! |--------|-----------------|-------------------------|
//! | 0x0    | Status          | read-only               |
//! | 0x4    | Control         | read/write              |
//! | 0x8    | Illegal request | read/write-1-to-clear   |
//! | 0xC    | Version         | read-only               |

/// Base address of the first freeze controller instance on the Agilex SoC FPGA reference
/// design. The actual address depends on the PR region layout of the loaded static design.
pub const FREEZE_CTRL_0_BASE_ADDR: usize = 0xF900_0450;

pub const STATUS_OFFSET: usize = 0x0;
pub const CONTROL_OFFSET: usize = 0x4;
pub const ILLEGAL_REQUEST_OFFSET: usize = 0x8;
pub const VERSION_OFFSET: usize = 0xC;

/// Register layout revision which is supported by the driver.
pub const SUPPORTED_VERSION: u32 = 0x0000_0002;
/// Officially released register layout revision.
pub const OFFICIAL_VERSION: u32 = 0xAD00_0003;

/// Returns whether the given raw version register value describes a compatible register layout.
#[inline]
pub const fn is_version_compatible(version: u32) -> bool {
    version == SUPPORTED_VERSION || version == OFFICIAL_VERSION
}

/// Completion flags. In steady state, exactly one of them is set.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Status {
    /// Unfreeze request complete.
    #[bit(1, rw)]
    unfreeze_done: bool,
    /// Freeze request complete.
    #[bit(0, rw)]
    freeze_done: bool,
}

impl Status {
    /// Acknowledgement mask for a freeze request.
    pub const FREEZE_DONE: Self = Self::DEFAULT.with_freeze_done(true);
    /// Acknowledgement mask for an unfreeze request.
    pub const UNFREEZE_DONE: Self = Self::DEFAULT.with_unfreeze_done(true);

    /// Keep only the bits which are also set in `mask`.
    #[inline]
    pub const fn masked(self, mask: Status) -> Status {
        Self::new_with_raw_value(self.raw_value() & mask.raw_value())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.raw_value() == 0
    }
}

/// Request register. This is a command register: writing [Control::IDLE] withdraws all requests.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Control {
    #[bit(2, rw)]
    unfreeze_request: bool,
    /// Reset the region logic. Written after a completed freeze.
    #[bit(1, rw)]
    reset_request: bool,
    #[bit(0, rw)]
    freeze_request: bool,
}

impl Control {
    pub const IDLE: Self = Self::DEFAULT;
    pub const FREEZE: Self = Self::DEFAULT.with_freeze_request(true);
    pub const RESET: Self = Self::DEFAULT.with_reset_request(true);
    pub const UNFREEZE: Self = Self::DEFAULT.with_unfreeze_request(true);
}

/// Freeze controller register block.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct FreezeController {
    #[mmio(Read)]
    status: Status,
    control: Control,
    /// Sticky illegal request flags. Writing back a set bit clears it.
    #[mmio(Read, Write)]
    illegal_request: u32,
    #[mmio(PureRead)]
    version: u32,
}

static_assertions::const_assert_eq!(core::mem::size_of::<FreezeController>(), 0x10);
static_assertions::const_assert_eq!(
    core::mem::offset_of!(FreezeController, status),
    STATUS_OFFSET
);
static_assertions::const_assert_eq!(
    core::mem::offset_of!(FreezeController, control),
    CONTROL_OFFSET
);
static_assertions::const_assert_eq!(
    core::mem::offset_of!(FreezeController, illegal_request),
    ILLEGAL_REQUEST_OFFSET
);
static_assertions::const_assert_eq!(
    core::mem::offset_of!(FreezeController, version),
    VERSION_OFFSET
);

impl FreezeController {
    /// Create a new MMIO instance for the freeze controller at address
    /// [FREEZE_CTRL_0_BASE_ADDR].
    ///
    /// # Safety
    ///
    /// This API can be used to potentially create a driver to the same peripheral structure
    /// from multiple threads. The user must ensure that concurrent accesses are safe and do not
    /// interfere with each other. In particular, only one freeze or unfreeze transaction may be
    /// in flight per register block.
    #[inline]
    pub const unsafe fn new_mmio_fixed_0() -> MmioFreezeController<'static> {
        unsafe { Self::new_mmio_at(FREEZE_CTRL_0_BASE_ADDR) }
    }
}
