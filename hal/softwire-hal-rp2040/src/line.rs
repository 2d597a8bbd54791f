//! Open-drain lines from RP2040 GPIO
//!
//! The RP2040 pads have no open-drain mode. It is emulated by keeping the
//! output latch low and toggling the output enable: enabled pulls the wire
//! low, disabled leaves it to the pull-up.

use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::Peri;
use softwire_hal::OpenDrainLine;

/// One I2C line on a flexible GPIO pin
pub struct FlexLine<'d> {
    pin: Flex<'d>,
    /// Enable the internal pull-up when joining the bus
    pull_up: bool,
}

impl<'d> FlexLine<'d> {
    /// Create a line relying on external pull-up resistors
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Flex::new(pin),
            pull_up: false,
        }
    }

    /// Create a line with the internal pull-up enabled
    ///
    /// The internal pull-up is weak (~50 kΩ); it is only adequate for
    /// short wires at the standard preset.
    pub fn with_internal_pull_up(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Flex::new(pin),
            pull_up: true,
        }
    }

    /// Give back the underlying pin
    pub fn into_inner(self) -> Flex<'d> {
        self.pin
    }
}

impl OpenDrainLine for FlexLine<'_> {
    fn set_open_drain(&mut self) {
        self.pin.set_pull(if self.pull_up { Pull::Up } else { Pull::None });
        // Latch low once; from here on only the direction changes
        self.pin.set_low();
        self.pin.set_as_input();
    }

    fn set_input(&mut self) {
        self.pin.set_as_input();
        self.pin.set_pull(Pull::None);
    }

    fn set_high(&mut self) {
        self.pin.set_as_input();
    }

    fn set_low(&mut self) {
        self.pin.set_as_output();
    }

    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
