//! Board-agnostic core of the bit-banged I2C master
//!
//! This crate turns two open-drain GPIO lines into an I2C bus master
//! without any hardware I2C peripheral:
//!
//! - Bus signal engine (start, stop, repeated start, ACK/NACK, byte shifting)
//! - Transaction processor (addressed read/write with status reporting)
//! - Wire-style message builder (buffered byte-at-a-time API)
//! - `embedded-hal` / `embedded-hal-async` I2C implementations and bus scan
//! - Speed presets and engine configuration
//!
//! Single master only: no arbitration, no slave mode, no 10-bit addresses.
//!
//! # Example
//!
//! ```ignore
//! let engine = BusEngine::new(sda, scl, SpeedPreset::Standard);
//! let mut wire: SoftWire<_, _> = SoftWire::new(engine);
//! wire.begin()?;
//!
//! wire.begin_transaction(0x50);
//! wire.queue_byte(0x10);
//! wire.queue_byte(0x20);
//! let status = wire.end_transaction();
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod log;

pub mod bus;
pub mod config;
pub mod engine;
pub mod status;
pub mod wire;

#[cfg(test)]
mod sim;

pub use bus::scan;
pub use config::{SpeedPreset, WireConfig};
pub use engine::{BusEngine, Direction, Message};
pub use status::{Error, TransferStatus};
pub use wire::{SoftWire, BUFFER_SIZE};
