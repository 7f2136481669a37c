//! Simulated freeze controller used by the unit tests.
//!
//! [Sim] implements both the register access trait and the delay traits. Hardware state advances
//! with every delay, which allows scripting the status register per poll attempt.
extern crate std;

use core::cell::RefCell;
use std::{rc::Rc, vec::Vec};

use agilex_freeze::csr::{Control, SUPPORTED_VERSION, Status};

use crate::ll::FreezeRegisters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadStatus(u32),
    ReadControl(u32),
    WriteControl(u32),
    ReadIllegal(u32),
    WriteIllegal(u32),
    ReadVersion(u32),
    /// Delay in nanoseconds.
    Delay(u64),
}

struct Hardware {
    version: u32,
    /// Status value indexed by the number of elapsed delays. The last entry holds afterwards.
    status_timeline: Vec<u32>,
    control: u32,
    illegal: u32,
    /// Illegal request flags raised at the given 1-based poll attempt.
    illegal_raise: Option<(usize, u32)>,
    illegal_stuck: bool,
    delays: usize,
    trace: Vec<Access>,
}

impl Hardware {
    fn status(&self) -> u32 {
        let idx = self.delays.min(self.status_timeline.len() - 1);
        self.status_timeline[idx]
    }

    fn record_delay(&mut self, ns: u64) {
        self.trace.push(Access::Delay(ns));
        self.delays += 1;
    }
}

#[derive(Clone)]
pub struct Sim(Rc<RefCell<Hardware>>);

impl Sim {
    /// Hardware with a compatible version and a constant status register value.
    pub fn new(status: u32) -> Self {
        Self(Rc::new(RefCell::new(Hardware {
            version: SUPPORTED_VERSION,
            status_timeline: Vec::from([status]),
            control: 0,
            illegal: 0,
            illegal_raise: None,
            illegal_stuck: false,
            delays: 0,
            trace: Vec::new(),
        })))
    }

    pub fn with_version(self, version: u32) -> Self {
        self.0.borrow_mut().version = version;
        self
    }

    pub fn with_status_timeline(self, timeline: &[u32]) -> Self {
        assert!(!timeline.is_empty());
        self.0.borrow_mut().status_timeline = Vec::from(timeline);
        self
    }

    pub fn with_illegal_request_at(self, attempt: usize, flags: u32) -> Self {
        self.0.borrow_mut().illegal_raise = Some((attempt, flags));
        self
    }

    /// Writing back the illegal request flags has no effect.
    pub fn with_stuck_illegal_request(self) -> Self {
        self.0.borrow_mut().illegal_stuck = true;
        self
    }

    pub fn trace(&self) -> Vec<Access> {
        self.0.borrow().trace.clone()
    }

    pub fn delays(&self) -> usize {
        self.0.borrow().delays
    }

    pub fn control(&self) -> u32 {
        self.0.borrow().control
    }

    pub fn control_writes(&self) -> Vec<u32> {
        self.0
            .borrow()
            .trace
            .iter()
            .filter_map(|access| match access {
                Access::WriteControl(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn version_reads(&self) -> usize {
        self.0
            .borrow()
            .trace
            .iter()
            .filter(|access| matches!(access, Access::ReadVersion(_)))
            .count()
    }
}

impl FreezeRegisters for Sim {
    fn read_status(&mut self) -> Status {
        let mut hw = self.0.borrow_mut();
        let status = hw.status();
        hw.trace.push(Access::ReadStatus(status));
        Status::new_with_raw_value(status)
    }

    fn read_control(&mut self) -> Control {
        let mut hw = self.0.borrow_mut();
        let control = hw.control;
        hw.trace.push(Access::ReadControl(control));
        Control::new_with_raw_value(control)
    }

    fn write_control(&mut self, value: Control) {
        let mut hw = self.0.borrow_mut();
        hw.control = value.raw_value();
        hw.trace.push(Access::WriteControl(value.raw_value()));
    }

    fn read_illegal_request(&mut self) -> u32 {
        let mut hw = self.0.borrow_mut();
        if let Some((attempt, flags)) = hw.illegal_raise {
            if hw.delays + 1 >= attempt {
                hw.illegal |= flags;
                hw.illegal_raise = None;
            }
        }
        let illegal = hw.illegal;
        hw.trace.push(Access::ReadIllegal(illegal));
        illegal
    }

    fn write_illegal_request(&mut self, value: u32) {
        let mut hw = self.0.borrow_mut();
        if !hw.illegal_stuck {
            hw.illegal &= !value;
        }
        hw.trace.push(Access::WriteIllegal(value));
    }

    fn read_version(&mut self) -> u32 {
        let mut hw = self.0.borrow_mut();
        let version = hw.version;
        hw.trace.push(Access::ReadVersion(version));
        version
    }
}

impl embedded_hal::delay::DelayNs for Sim {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().record_delay(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().record_delay(us as u64 * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().record_delay(ms as u64 * 1_000_000);
    }
}

impl embedded_hal_async::delay::DelayNs for Sim {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().record_delay(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().record_delay(us as u64 * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().record_delay(ms as u64 * 1_000_000);
    }
}
