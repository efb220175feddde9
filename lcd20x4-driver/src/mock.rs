//! Recording bus and delay for driver tests
//!
//! Both halves append to one shared [`Trace`], so tests can assert the
//! exact interleaving of bus bursts and settle delays.

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use lcd20x4_hal::I2cBus;

use crate::encoder::{self, Register};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Probe(u8),
    Write { address: u8, bytes: Vec<u8> },
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Debug, Default)]
pub struct Trace {
    events: Vec<Event>,
    ready: Vec<u8>,
    fail_writes: bool,
}

impl Trace {
    /// Trace for a bus where only `ready` addresses acknowledge
    pub fn with_ready(ready: &[u8]) -> RefCell<Self> {
        RefCell::new(Self {
            ready: ready.to_vec(),
            ..Self::default()
        })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Every 4-byte burst decoded back into (byte, register)
    pub fn transfers(&self) -> Vec<(u8, Register)> {
        self.bursts()
            .map(|(_, burst)| {
                let (value, lines) = encoder::decode(&burst).expect("malformed burst");
                (value, lines.register)
            })
            .collect()
    }

    /// Destination address of every burst
    pub fn burst_addresses(&self) -> Vec<u8> {
        self.bursts().map(|(address, _)| address).collect()
    }

    pub fn commands(&self) -> Vec<u8> {
        self.transfers()
            .into_iter()
            .filter(|(_, register)| *register == Register::Command)
            .map(|(value, _)| value)
            .collect()
    }

    pub fn data(&self) -> Vec<u8> {
        self.transfers()
            .into_iter()
            .filter(|(_, register)| *register == Register::Data)
            .map(|(value, _)| value)
            .collect()
    }

    fn bursts(&self) -> impl Iterator<Item = (u8, [u8; 4])> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Write { address, bytes } => {
                let burst: [u8; 4] = bytes.as_slice().try_into().ok()?;
                Some((*address, burst))
            }
            _ => None,
        })
    }
}

pub struct MockBus<'a> {
    trace: &'a RefCell<Trace>,
}

impl<'a> MockBus<'a> {
    pub fn new(trace: &'a RefCell<Trace>) -> Self {
        Self { trace }
    }
}

impl I2cBus for MockBus<'_> {
    type Error = BusFault;

    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        let mut trace = self.trace.borrow_mut();
        trace.events.push(Event::Write {
            address,
            bytes: data.to_vec(),
        });
        if trace.fail_writes {
            Err(BusFault)
        } else {
            Ok(())
        }
    }

    fn is_ready(&mut self, address: u8, _trials: u8, _timeout_ms: u32) -> bool {
        let mut trace = self.trace.borrow_mut();
        trace.events.push(Event::Probe(address));
        trace.ready.contains(&address)
    }
}

pub struct MockDelay<'a> {
    trace: &'a RefCell<Trace>,
}

impl<'a> MockDelay<'a> {
    pub fn new(trace: &'a RefCell<Trace>) -> Self {
        Self { trace }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().events.push(Event::DelayMs(ms));
    }
}
