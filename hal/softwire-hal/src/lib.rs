//! Softwire Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the bit-banged I2C master
//! needs from a board: two open-drain lines and a calibrated delay. Chip
//! crates implement them; `softwire-core` consumes them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (softwire-scanner, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softwire-core (engine, transactions)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softwire-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ softwire-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OpenDrainLine`] - One open-drain bus line (SDA or SCL)
//! - [`delay::DelayLoop`] - Inter-transition delay primitive
//! - [`i2c::I2cBus`] - Addressed I2C read/write operations

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use delay::{DelayLoop, SpinDelay};
pub use gpio::OpenDrainLine;
pub use i2c::{I2cBus, I2cConfig};
