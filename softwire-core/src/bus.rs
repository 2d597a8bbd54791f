//! Bus-level trait implementations
//!
//! Lets the engine stand in wherever a driver expects an I2C master:
//! the workspace [`I2cBus`] trait, `embedded-hal` 1.0 blocking I2C and
//! `embedded-hal-async` I2C.

use embedded_hal::i2c::{ErrorType, Operation};
use heapless::Vec;
use softwire_hal::{DelayLoop, I2cBus, OpenDrainLine};

use crate::engine::{address_byte, BusEngine, Direction, Message};
use crate::log::debug;
use crate::status::Error;

/// First address probed by [`scan`]; 0x00-0x07 are reserved
pub const SCAN_FIRST: u8 = 0x08;

/// Last address probed by [`scan`]; 0x78-0x7F are reserved
pub const SCAN_LAST: u8 = 0x77;

/// Maximum number of devices [`scan`] can report
pub const SCAN_CAPACITY: usize = (SCAN_LAST - SCAN_FIRST) as usize + 1;

/// Probe every non-reserved 7-bit address with an empty write
///
/// Returns the addresses that acknowledged, in ascending order.
pub fn scan<B: I2cBus>(bus: &mut B) -> Vec<u8, SCAN_CAPACITY> {
    let mut found = Vec::new();
    for address in SCAN_FIRST..=SCAN_LAST {
        if bus.write(address, &[]).is_ok() {
            debug!("device found at {=u8:#x}", address);
            if found.push(address).is_err() {
                break;
            }
        }
    }
    found
}

impl<SDA, SCL, D> I2cBus for BusEngine<SDA, SCL, D>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.process(&mut Message::write(address, data), true)
            .into_result()
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        // An acknowledged read of nothing leaves the slave holding SDA
        if buf.is_empty() {
            return I2cBus::write(self, address, &[]);
        }
        self.process(&mut Message::read(address, buf), true)
            .into_result()
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        if read_buf.is_empty() {
            return I2cBus::write(self, address, write_data);
        }
        self.process(&mut Message::write(address, write_data), false)
            .into_result()?;
        self.process(&mut Message::read(address, read_buf), true)
            .into_result()
    }
}

impl<SDA, SCL, D> ErrorType for BusEngine<SDA, SCL, D> {
    type Error = Error;
}

fn operation_direction(op: &Operation<'_>) -> Direction {
    match op {
        Operation::Read(_) => Direction::Read,
        Operation::Write(_) => Direction::Write,
    }
}

fn operation_is_empty(op: &Operation<'_>) -> bool {
    match op {
        Operation::Read(buf) => buf.is_empty(),
        Operation::Write(data) => data.is_empty(),
    }
}

/// Whether the next bytes clocked after this operation are still reads
fn read_continues(rest: &[Operation<'_>]) -> bool {
    rest.iter()
        .find(|op| !operation_is_empty(op))
        .is_some_and(|op| operation_direction(op) == Direction::Read)
}

impl<SDA, SCL, D> BusEngine<SDA, SCL, D>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    /// Address the device, stopping the bus if nobody answers
    fn open(&mut self, address: u8, direction: Direction) -> Result<(), Error> {
        self.start()?;
        self.shift_out_byte(address_byte(address, direction))?;
        if !self.get_ack()? {
            self.stop()?;
            return Err(Error::AddressNack);
        }
        Ok(())
    }

    /// Run an `embedded-hal` operation list as one bus transaction
    ///
    /// Adjacent operations of the same direction are merged with no
    /// repeated start between them; a direction change issues a repeated
    /// start and a new address byte. Only the final byte of a read run is
    /// NACKed. Empty operations put nothing on the bus and never split a
    /// run; a list of nothing but empty operations is sent as an address
    /// probe in the write direction.
    fn run_operations(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Error> {
        if !self.is_active() {
            return Err(Error::BusInactive);
        }

        let mut previous: Option<Direction> = None;
        for index in 0..operations.len() {
            if operation_is_empty(&operations[index]) {
                continue;
            }

            let more_reads = read_continues(&operations[index + 1..]);
            let op = &mut operations[index];
            let direction = operation_direction(op);

            if previous != Some(direction) {
                if previous.is_some() {
                    self.repeated_start()?;
                }
                self.open(address, direction)?;
            }

            match op {
                Operation::Write(data) => {
                    for &byte in data.iter() {
                        self.shift_out_byte(byte)?;
                        if !self.get_ack()? {
                            self.stop()?;
                            return Err(Error::DataNack);
                        }
                    }
                }
                Operation::Read(buf) => {
                    let len = buf.len();
                    for (i, slot) in buf.iter_mut().enumerate() {
                        *slot = self.shift_in_byte()?;
                        if i + 1 < len || more_reads {
                            self.send_ack()?;
                        } else {
                            self.send_nack()?;
                        }
                    }
                }
            }

            previous = Some(direction);
        }

        match previous {
            Some(_) => self.stop()?,
            // An addressed read with no bytes would leave the slave driving SDA
            None if !operations.is_empty() => {
                self.open(address, Direction::Write)?;
                self.stop()?;
            }
            None => {}
        }
        Ok(())
    }
}

impl<SDA, SCL, D> embedded_hal::i2c::I2c for BusEngine<SDA, SCL, D>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run_operations(address, operations)
    }
}

impl<SDA, SCL, D> embedded_hal_async::i2c::I2c for BusEngine<SDA, SCL, D>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    /// Bit-bangs on the calling task; completes without yielding
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run_operations(address, operations)
    }
}
