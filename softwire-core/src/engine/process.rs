//! Transaction processor
//!
//! Runs one addressed transfer on a [`BusEngine`]: start, address byte,
//! address ACK, then either data out (with per-byte ACK checks) or data in
//! (ACK every byte but the last, NACK the last), then stop or repeated
//! start. Failures always leave the bus idle with a stop, except a clock
//! stretch timeout where the slave still owns SCL.

use softwire_hal::{DelayLoop, OpenDrainLine};

use super::signal::BusEngine;
use crate::log::{debug, trace, warn};
use crate::status::{Error, TransferStatus};

/// Transfer direction, encoded in bit 0 of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master to slave (R/W bit 0)
    Write,
    /// Slave to master (R/W bit 1)
    Read,
}

impl Direction {
    /// The R/W bit for this direction
    pub const fn rw_bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => 1,
        }
    }
}

/// Compose the 8-bit address byte: 7-bit address, then the R/W bit
///
/// Bit 7 of `address` is shifted out and lost; only 7-bit addressing is
/// supported.
pub const fn address_byte(address: u8, direction: Direction) -> u8 {
    (address << 1) | direction.rw_bit()
}

/// Data carried by a message
#[derive(Debug)]
pub enum Payload<'a> {
    /// Bytes to send
    Write(&'a [u8]),
    /// Buffer to fill; its length is the number of bytes requested
    Read(&'a mut [u8]),
}

/// One in-flight transaction
///
/// Built per call; the buffer is borrowed from the caller for the duration
/// of the transaction. Direction cannot change once built.
#[derive(Debug)]
pub struct Message<'a> {
    address: u8,
    payload: Payload<'a>,
    transferred: usize,
}

impl<'a> Message<'a> {
    /// Write `data` to the device at `address`
    pub fn write(address: u8, data: &'a [u8]) -> Self {
        Self {
            address,
            payload: Payload::Write(data),
            transferred: 0,
        }
    }

    /// Read `buf.len()` bytes from the device at `address`
    pub fn read(address: u8, buf: &'a mut [u8]) -> Self {
        Self {
            address,
            payload: Payload::Read(buf),
            transferred: 0,
        }
    }

    /// Target 7-bit address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Transfer direction
    pub fn direction(&self) -> Direction {
        match self.payload {
            Payload::Write(_) => Direction::Write,
            Payload::Read(_) => Direction::Read,
        }
    }

    /// Address byte as it goes on the wire
    pub fn address_byte(&self) -> u8 {
        address_byte(self.address, self.direction())
    }

    /// Requested length in bytes
    pub fn len(&self) -> usize {
        match &self.payload {
            Payload::Write(data) => data.len(),
            Payload::Read(buf) => buf.len(),
        }
    }

    /// Check for a zero-length message (address-only probe)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes moved so far; never exceeds [`len`](Self::len)
    pub fn transferred(&self) -> usize {
        self.transferred
    }

    /// Bytes received so far (empty for writes)
    pub fn received(&self) -> &[u8] {
        match &self.payload {
            Payload::Write(_) => &[],
            Payload::Read(buf) => &buf[..self.transferred],
        }
    }
}

impl<SDA, SCL, D> BusEngine<SDA, SCL, D>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    /// Execute one full addressed transaction
    ///
    /// With `send_stop` false the bus is kept with a repeated start, so the
    /// next transaction (typically a read after a register-address write)
    /// follows without releasing it.
    pub fn process(&mut self, msg: &mut Message<'_>, send_stop: bool) -> TransferStatus {
        self.run(msg, send_stop).into()
    }

    fn run(&mut self, msg: &mut Message<'_>, send_stop: bool) -> Result<(), Error> {
        msg.transferred = 0;

        if !self.is_active() {
            warn!("transaction attempted on inactive bus");
            return Err(Error::BusInactive);
        }

        let sla = msg.address_byte();
        trace!("address byte {=u8:#x}, {=usize} bytes", sla, msg.len());

        self.start()?;
        self.shift_out_byte(sla)?;
        if !self.get_ack()? {
            // Leave SCL high again so the next start clocks correctly
            self.stop()?;
            debug!("address {=u8:#x} not acknowledged", msg.address);
            return Err(Error::AddressNack);
        }

        match &mut msg.payload {
            Payload::Read(buf) => {
                let len = buf.len();
                for (index, slot) in buf.iter_mut().enumerate() {
                    *slot = self.shift_in_byte()?;
                    msg.transferred = index + 1;
                    if msg.transferred < len {
                        self.send_ack()?;
                    } else {
                        self.send_nack()?;
                    }
                }
            }
            Payload::Write(data) => {
                for &byte in data.iter() {
                    self.shift_out_byte(byte)?;
                    if !self.get_ack()? {
                        self.stop()?;
                        warn!(
                            "address {=u8:#x} stopped acknowledging after {=usize} bytes",
                            msg.address,
                            msg.transferred
                        );
                        return Err(Error::DataNack);
                    }
                    msg.transferred += 1;
                }
            }
        }

        if send_stop {
            self.stop()
        } else {
            self.repeated_start()
        }
    }
}
