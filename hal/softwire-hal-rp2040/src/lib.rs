//! RP2040-specific HAL for the bit-banged I2C master
//!
//! This crate provides RP2040 implementations of the `softwire-hal`
//! collaborator traits:
//!
//! - Open-drain bus lines on top of `embassy_rp::gpio::Flex`
//! - A cycle-counted delay calibrated to the system clock

#![no_std]

pub mod delay;
pub mod line;

pub use delay::{CycleDelay, RP2040_SYS_CLOCK_HZ};
pub use line::FlexLine;

// Re-export shared traits from softwire-hal for convenience
pub use softwire_hal::{DelayLoop, OpenDrainLine};
