//! Simulated open-drain bus for host tests
//!
//! Models SDA and SCL as wired-AND lines shared between the engine under
//! test and one slave device. The slave decodes START/STOP conditions and
//! bytes on SCL edges, acknowledges or refuses per its [`Device`] setup,
//! serves read data, and records what it saw as [`Event`]s.

use core::cell::RefCell;

use heapless::Vec;
use softwire_hal::OpenDrainLine;

use crate::config::WireConfig;
use crate::engine::BusEngine;

/// Maximum events recorded per test; a full address scan logs 336
const MAX_EVENTS: usize = 512;

/// Something the slave observed on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// START or repeated START (SDA fell while SCL high)
    Start,
    /// STOP (SDA rose while SCL high)
    Stop,
    /// Address byte received, R/W bit included
    Address(u8),
    /// Data byte received from the master
    Write(u8),
    /// Master acknowledged a byte the slave sent
    MasterAck,
    /// Master refused a byte the slave sent
    MasterNack,
}

/// Slave device behavior
#[derive(Debug, Clone, Default)]
pub struct Device {
    /// Address the device answers to (None = empty bus)
    address: Option<u8>,
    /// Index of the first written data byte to refuse
    nack_write_at: Option<usize>,
    /// Bytes served to reads (0xFF once exhausted)
    read_data: Vec<u8, 64>,
    /// SCL polls to hold the clock low after each release
    stretch_polls: u32,
    /// Never release SCL
    hold_clock: bool,
}

impl Device {
    /// Nobody on the bus
    pub fn absent() -> Self {
        Self::default()
    }

    /// A device answering at `address`
    pub fn at(address: u8) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    /// Serve `data` to reads
    pub fn with_read_data(mut self, data: &[u8]) -> Self {
        self.read_data = Vec::from_slice(data).unwrap();
        self
    }

    /// Refuse the data byte at `index` (0-based, across the whole test)
    pub fn nack_write_at(mut self, index: usize) -> Self {
        self.nack_write_at = Some(index);
        self
    }

    /// Stretch the clock for `polls` reads after each SCL release
    pub fn stretching(mut self, polls: u32) -> Self {
        self.stretch_polls = polls;
        self
    }

    /// Hold SCL low forever
    pub fn holding_clock(mut self) -> Self {
        self.hold_clock = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Address,
    AddressAck { ack: bool, read: bool },
    Write,
    WriteAck { ack: bool },
    Read,
    MasterAckSlot,
}

#[derive(Debug, Clone, Copy)]
enum Which {
    Sda,
    Scl,
}

struct BusState {
    device: Device,
    master_sda: bool,
    master_scl: bool,
    slave_sda: bool,
    sda_output: bool,
    scl_output: bool,
    stretch_remaining: u32,
    phase: Phase,
    shift: u8,
    bits: u8,
    current: u8,
    master_acked: bool,
    written: usize,
    read_index: usize,
    events: Vec<Event, MAX_EVENTS>,
    written_bytes: Vec<u8, MAX_EVENTS>,
    line_ops: usize,
}

impl BusState {
    fn sda(&self) -> bool {
        self.master_sda && self.slave_sda
    }

    fn log(&mut self, event: Event) {
        self.events
            .push(event)
            .expect("simulated bus event log overflowed");
    }

    fn drive(&mut self, which: Which, level: bool) {
        self.line_ops += 1;
        let scl_before = self.master_scl;
        let sda_before = self.sda();

        match which {
            Which::Sda => {
                self.master_sda = level;
                let sda_after = self.sda();
                if scl_before && sda_before != sda_after {
                    if sda_after {
                        self.on_stop();
                    } else {
                        self.on_start();
                    }
                }
            }
            Which::Scl => {
                self.master_scl = level;
                if level && !scl_before {
                    self.stretch_remaining = self.device.stretch_polls;
                    self.on_rise();
                } else if !level && scl_before {
                    self.on_fall();
                }
            }
        }
    }

    fn read(&mut self, which: Which) -> bool {
        match which {
            Which::Sda => self.sda(),
            Which::Scl => {
                if self.device.hold_clock {
                    return false;
                }
                if self.master_scl && self.stretch_remaining > 0 {
                    self.stretch_remaining -= 1;
                    return false;
                }
                self.master_scl
            }
        }
    }

    fn on_start(&mut self) {
        self.log(Event::Start);
        self.phase = Phase::Address;
        self.shift = 0;
        self.bits = 0;
        self.slave_sda = true;
    }

    fn on_stop(&mut self) {
        self.log(Event::Stop);
        self.phase = Phase::Idle;
        self.slave_sda = true;
    }

    fn on_rise(&mut self) {
        match self.phase {
            Phase::Address | Phase::Write => {
                self.shift = (self.shift << 1) | self.sda() as u8;
                self.bits += 1;
            }
            Phase::Read => self.bits += 1,
            Phase::MasterAckSlot => {
                self.master_acked = !self.sda();
                let event = if self.master_acked {
                    Event::MasterAck
                } else {
                    Event::MasterNack
                };
                self.log(event);
            }
            _ => {}
        }
    }

    fn on_fall(&mut self) {
        match self.phase {
            Phase::Address if self.bits == 8 => {
                let byte = self.shift;
                self.log(Event::Address(byte));
                let ack = self.device.address == Some(byte >> 1);
                self.slave_sda = !ack;
                self.phase = Phase::AddressAck {
                    ack,
                    read: byte & 1 == 1,
                };
            }
            Phase::Write if self.bits == 8 => {
                let byte = self.shift;
                self.log(Event::Write(byte));
                self.written_bytes
                    .push(byte)
                    .expect("simulated bus write log overflowed");
                let ack = self.device.nack_write_at != Some(self.written);
                self.written += 1;
                self.slave_sda = !ack;
                self.phase = Phase::WriteAck { ack };
            }
            Phase::AddressAck { ack, read } => {
                self.slave_sda = true;
                if !ack {
                    self.phase = Phase::Idle;
                } else if read {
                    self.phase = Phase::Read;
                    self.load_read_byte();
                } else {
                    self.phase = Phase::Write;
                    self.shift = 0;
                    self.bits = 0;
                }
            }
            Phase::WriteAck { ack } => {
                self.slave_sda = true;
                if ack {
                    self.phase = Phase::Write;
                    self.shift = 0;
                    self.bits = 0;
                } else {
                    self.phase = Phase::Idle;
                }
            }
            Phase::Read => {
                if self.bits == 8 {
                    self.slave_sda = true;
                    self.phase = Phase::MasterAckSlot;
                } else {
                    self.slave_sda = self.current & (0x80 >> self.bits) != 0;
                }
            }
            Phase::MasterAckSlot => {
                if self.master_acked {
                    self.phase = Phase::Read;
                    self.load_read_byte();
                } else {
                    self.phase = Phase::Idle;
                }
            }
            _ => {}
        }
    }

    fn load_read_byte(&mut self) {
        self.current = self
            .device
            .read_data
            .get(self.read_index)
            .copied()
            .unwrap_or(0xFF);
        self.read_index += 1;
        self.bits = 0;
        self.slave_sda = self.current & 0x80 != 0;
    }
}

/// Shared bus with one slave device
pub struct SimBus {
    state: RefCell<BusState>,
}

impl SimBus {
    /// Idle bus (both lines pulled up) with `device` attached
    pub fn new(device: Device) -> Self {
        Self {
            state: RefCell::new(BusState {
                device,
                master_sda: true,
                master_scl: true,
                slave_sda: true,
                sda_output: false,
                scl_output: false,
                stretch_remaining: 0,
                phase: Phase::Idle,
                shift: 0,
                bits: 0,
                current: 0,
                master_acked: false,
                written: 0,
                read_index: 0,
                events: Vec::new(),
                written_bytes: Vec::new(),
                line_ops: 0,
            }),
        }
    }

    /// Line handles for the engine: (SDA, SCL)
    pub fn lines(&self) -> (SimLine<'_>, SimLine<'_>) {
        (
            SimLine {
                bus: self,
                which: Which::Sda,
            },
            SimLine {
                bus: self,
                which: Which::Scl,
            },
        )
    }

    /// Everything the slave observed so far
    pub fn events(&self) -> Vec<Event, MAX_EVENTS> {
        self.state.borrow().events.clone()
    }

    /// Number of times `event` was observed
    pub fn count(&self, event: Event) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|e| **e == event)
            .count()
    }

    /// Data bytes the slave received
    pub fn written(&self) -> Vec<u8, MAX_EVENTS> {
        self.state.borrow().written_bytes.clone()
    }

    /// Every configure/drive call made by the master
    pub fn line_ops(&self) -> usize {
        self.state.borrow().line_ops
    }

    /// Make the slave grab SCL from now on
    pub fn hold_clock(&self) {
        self.state.borrow_mut().device.hold_clock = true;
    }

    /// SDA level on the wire
    pub fn sda_high(&self) -> bool {
        self.state.borrow().sda()
    }

    /// SCL level on the wire (ignoring stretching)
    pub fn scl_high(&self) -> bool {
        self.state.borrow().master_scl
    }

    /// Both lines high
    pub fn is_idle(&self) -> bool {
        self.sda_high() && self.scl_high()
    }

    /// Both lines configured as open-drain outputs
    pub fn lines_are_outputs(&self) -> bool {
        let state = self.state.borrow();
        state.sda_output && state.scl_output
    }

    /// Both lines configured as inputs
    pub fn lines_are_released(&self) -> bool {
        let state = self.state.borrow();
        !state.sda_output && !state.scl_output && state.master_sda && state.master_scl
    }
}

/// One end of the simulated bus, held by the engine
pub struct SimLine<'a> {
    bus: &'a SimBus,
    which: Which,
}

impl OpenDrainLine for SimLine<'_> {
    fn set_open_drain(&mut self) {
        let mut state = self.bus.state.borrow_mut();
        state.line_ops += 1;
        match self.which {
            Which::Sda => state.sda_output = true,
            Which::Scl => state.scl_output = true,
        }
    }

    fn set_input(&mut self) {
        let mut state = self.bus.state.borrow_mut();
        match self.which {
            Which::Sda => state.sda_output = false,
            Which::Scl => state.scl_output = false,
        }
        state.drive(self.which, true);
    }

    fn set_high(&mut self) {
        self.bus.state.borrow_mut().drive(self.which, true);
    }

    fn set_low(&mut self) {
        self.bus.state.borrow_mut().drive(self.which, false);
    }

    fn is_high(&self) -> bool {
        self.bus.state.borrow_mut().read(self.which)
    }
}

fn no_delay(_: u16) {}

/// Engine on `bus` with no delay and default config, not yet started
pub fn engine_on(bus: &SimBus) -> BusEngine<SimLine<'_>, SimLine<'_>, fn(u16)> {
    let (sda, scl) = bus.lines();
    BusEngine::with_delay(sda, scl, no_delay as fn(u16), WireConfig::default())
}
