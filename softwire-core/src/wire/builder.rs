//! Wire-style transaction API
//!
//! ```text
//! begin_transaction(addr) → queue_byte(b)… → end_transaction() → status
//! request_bytes(addr, n) → available() → read_next_byte()…
//! ```

use softwire_hal::{DelayLoop, OpenDrainLine, SpinDelay};

use super::buffer::{RxBuffer, TxBuffer, BUFFER_SIZE};
use crate::engine::{BusEngine, Message};
use crate::log::{debug, warn};
use crate::status::{Error, TransferStatus};

/// Buffered I2C master
///
/// Owns the engine plus one transmit and one receive buffer of `N` bytes.
pub struct SoftWire<SDA, SCL, D = SpinDelay, const N: usize = BUFFER_SIZE> {
    engine: BusEngine<SDA, SCL, D>,
    tx_address: u8,
    tx: TxBuffer<N>,
    rx: RxBuffer<N>,
}

impl<SDA, SCL, D, const N: usize> SoftWire<SDA, SCL, D, N>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    /// Wrap an engine; call [`begin`](Self::begin) before transferring
    pub fn new(engine: BusEngine<SDA, SCL, D>) -> Self {
        Self {
            engine,
            tx_address: 0,
            tx: TxBuffer::new(),
            rx: RxBuffer::new(),
        }
    }

    /// Clear both buffers and join the bus as master
    pub fn begin(&mut self) -> Result<(), Error> {
        self.tx.reset();
        self.rx.reset();
        self.engine.begin()
    }

    /// Release both lines
    pub fn end(&mut self) {
        self.engine.end();
    }

    /// Select the speed preset for a standard bus frequency
    pub fn set_speed(&mut self, frequency_hz: u32) {
        self.engine.set_speed(frequency_hz);
    }

    /// Start composing a write to `address`
    pub fn begin_transaction(&mut self, address: u8) {
        self.tx_address = address;
        self.tx.reset();
    }

    /// Queue one outgoing byte
    ///
    /// Past capacity the byte is dropped and the transaction will end with
    /// [`TransferStatus::DataTooLong`].
    pub fn queue_byte(&mut self, value: u8) {
        let already_full = self.tx.overflowed();
        if !self.tx.push(value) && !already_full {
            warn!("transmit buffer full, dropping {=u8:#x}", value);
        }
    }

    /// Queue several outgoing bytes
    pub fn queue_slice(&mut self, values: &[u8]) {
        for &value in values {
            self.queue_byte(value);
        }
    }

    /// Send the queued bytes and release the bus
    pub fn end_transaction(&mut self) -> TransferStatus {
        self.end_transaction_with(true)
    }

    /// Send the queued bytes, ending with a stop or a repeated start
    ///
    /// An overflowed buffer is reported without touching the bus.
    pub fn end_transaction_with(&mut self, send_stop: bool) -> TransferStatus {
        if self.tx.overflowed() {
            warn!(
                "transaction to {=u8:#x} exceeds {=usize} byte buffer",
                self.tx_address,
                N
            );
            return TransferStatus::DataTooLong;
        }

        let mut msg = Message::write(self.tx_address, self.tx.as_slice());
        let status = self.engine.process(&mut msg, send_stop);
        self.tx.reset();
        status
    }

    /// Read up to `count` bytes from `address` into the receive buffer
    ///
    /// `count` is clamped to the space left in the receive buffer. Returns
    /// the number of bytes now available to read, including any left from
    /// earlier requests. A missing device simply adds nothing. A request
    /// that clamps to zero bytes leaves the bus untouched.
    pub fn request_bytes(&mut self, address: u8, count: usize) -> usize {
        let spare = self.rx.spare_mut(count);
        if spare.is_empty() {
            debug!("request from {=u8:#x} has no room, skipped", address);
            return self.rx.available();
        }

        let mut msg = Message::read(address, spare);
        let status = self.engine.process(&mut msg, true);
        let received = msg.transferred();
        if !status.is_success() {
            debug!(
                "request from {=u8:#x} ended with status {=u8}",
                address,
                status.code()
            );
        }

        self.rx.commit(received);
        self.rx.available()
    }

    /// Bytes received and not yet read
    pub fn available(&self) -> usize {
        self.rx.available()
    }

    /// Next received byte, or 0 once the buffer is exhausted
    ///
    /// Exhaustion is indistinguishable from a received zero; use
    /// [`try_read_next_byte`](Self::try_read_next_byte) to tell them apart.
    pub fn read_next_byte(&mut self) -> u8 {
        self.rx.pop().unwrap_or(0)
    }

    /// Next received byte, or `None` once the buffer is exhausted
    pub fn try_read_next_byte(&mut self) -> Option<u8> {
        self.rx.pop()
    }

    /// Underlying engine
    pub fn engine(&self) -> &BusEngine<SDA, SCL, D> {
        &self.engine
    }

    /// Underlying engine, e.g. for the `embedded-hal` I2C traits
    pub fn engine_mut(&mut self) -> &mut BusEngine<SDA, SCL, D> {
        &mut self.engine
    }

    /// Unwrap the engine, discarding the buffers
    pub fn into_engine(self) -> BusEngine<SDA, SCL, D> {
        self.engine
    }
}
