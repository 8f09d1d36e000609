//! Recording bus used by the driver tests

extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use pixband_hal::{OutputPin, SpiBus};

/// One byte seen on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Byte sent with A0 low
    Command(u8),
    /// Byte sent with A0 high
    Data(u8),
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    cs_high: bool,
    dc_high: bool,
    active_high: bool,
    deselected_write: bool,
    fail: bool,
    delay_ns: u64,
}

/// Shared view of the mock SPI bus, pins and delay
#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<State>>);

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi(self.clone())
    }

    pub fn cs(&self) -> MockCs {
        MockCs(self.clone())
    }

    pub fn dc(&self) -> MockDc {
        MockDc(self.clone())
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// Commands in the order they were sent
    pub fn commands(&self) -> Vec<u8> {
        self.0
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(*c),
                Event::Data(_) => None,
            })
            .collect()
    }

    /// Parameter bytes following the first occurrence of `command`
    pub fn params_of(&self, command: u8) -> Vec<u8> {
        self.0
            .borrow()
            .events
            .iter()
            .skip_while(|e| **e != Event::Command(command))
            .skip(1)
            .map_while(|e| match e {
                Event::Data(d) => Some(*d),
                Event::Command(_) => None,
            })
            .collect()
    }

    pub fn set_active_high(&self, active_high: bool) {
        self.0.borrow_mut().active_high = active_high;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail = fail;
    }

    pub fn cs_high(&self) -> bool {
        self.0.borrow().cs_high
    }

    /// No byte was written while the panel was deselected
    pub fn all_selected(&self) -> bool {
        !self.0.borrow().deselected_write
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.0.borrow().delay_ns / 1_000_000
    }
}

pub struct MockSpi(Bus);

impl SpiBus for MockSpi {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        let mut state = (self.0).0.borrow_mut();
        if state.fail {
            return Err(());
        }
        if state.cs_high != state.active_high {
            state.deselected_write = true;
        }
        let dc_high = state.dc_high;
        state.events.extend(data.iter().map(|&b| {
            if dc_high {
                Event::Data(b)
            } else {
                Event::Command(b)
            }
        }));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

pub struct MockCs(Bus);

impl OutputPin for MockCs {
    fn set_high(&mut self) {
        (self.0).0.borrow_mut().cs_high = true;
    }

    fn set_low(&mut self) {
        (self.0).0.borrow_mut().cs_high = false;
    }

    fn is_set_high(&self) -> bool {
        (self.0).0.borrow().cs_high
    }
}

pub struct MockDc(Bus);

impl OutputPin for MockDc {
    fn set_high(&mut self) {
        (self.0).0.borrow_mut().dc_high = true;
    }

    fn set_low(&mut self) {
        (self.0).0.borrow_mut().dc_high = false;
    }

    fn is_set_high(&self) -> bool {
        (self.0).0.borrow().dc_high
    }
}

pub struct MockDelay(Bus);

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        (self.0).0.borrow_mut().delay_ns += ns as u64;
    }
}
