//! Open-drain line abstraction
//!
//! An I2C line is never driven high. "High" means released: the pin stops
//! sinking current and the pull-up brings the wire up, unless some other
//! device on the bus is still holding it low. Reading the line therefore
//! reports the wired-AND of every device, not what this side asked for.

/// One open-drain bus line
///
/// Implementations wrap an already-resolved pin handle. The engine owns
/// the line exclusively between `begin()` and `end()`.
pub trait OpenDrainLine {
    /// Configure the pin as an open-drain output
    fn set_open_drain(&mut self);

    /// Configure the pin as a plain input, releasing the line
    fn set_input(&mut self);

    /// Release the line (pull-up takes it high unless held)
    fn set_high(&mut self);

    /// Actively pull the line low
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_level(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Sample the actual logic level on the wire
    fn is_high(&self) -> bool;

    /// Check if the wire currently reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
