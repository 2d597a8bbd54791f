//! Wire-style message builder
//!
//! Byte-at-a-time buffering on top of the transaction processor: queue
//! outgoing bytes, send them in one transaction, request incoming bytes
//! and drain them one by one.

pub mod buffer;
pub mod builder;

pub use buffer::{RxBuffer, TxBuffer, BUFFER_SIZE};
pub use builder::SoftWire;
