//! Bit-level I2C engine
//!
//! [`BusEngine`] owns the two open-drain lines and produces the electrical
//! primitives (start, stop, repeated start, ACK/NACK, byte shifting). The
//! transaction processor in [`process`] sequences those primitives into a
//! complete addressed transfer.
//!
//! Low-level conventions:
//! - SDA and SCL idle high (released)
//! - every line change is preceded by the delay, never followed by it
//! - bits are shifted most significant first

pub mod process;
pub mod signal;

pub use process::{address_byte, Direction, Message, Payload};
pub use signal::BusEngine;
