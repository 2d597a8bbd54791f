//! Bus signal engine
//!
//! Owns the SDA/SCL lines and the inter-transition delay, and exposes the
//! I2C electrical primitives. Only the SCL wait can block for longer than
//! the configured delay: a slave may stretch the clock by holding SCL low.

use softwire_hal::{DelayLoop, OpenDrainLine, SpinDelay};

use crate::config::{SpeedPreset, WireConfig};
use crate::log::{debug, warn};
use crate::status::Error;

/// Bit-banged I2C master engine
///
/// Exclusively owns both lines from construction until [`release`](Self::release).
/// The engine is not reentrant; at most one transaction runs at a time.
pub struct BusEngine<SDA, SCL, D = SpinDelay> {
    sda: SDA,
    scl: SCL,
    delay: D,
    /// Delay loops before every line change
    delay_loops: u16,
    /// Maximum SCL polls while stretched (None = wait forever)
    stretch_limit: Option<u32>,
    /// Between begin() and end()
    active: bool,
}

impl<SDA, SCL> BusEngine<SDA, SCL, SpinDelay>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
{
    /// Create an engine using the default busy-loop delay
    ///
    /// # Arguments
    /// - `sda`: Data line
    /// - `scl`: Clock line
    /// - `preset`: Initial speed preset
    pub fn new(sda: SDA, scl: SCL, preset: SpeedPreset) -> Self {
        Self::with_delay(sda, scl, SpinDelay, preset.into())
    }
}

impl<SDA, SCL, D> BusEngine<SDA, SCL, D>
where
    SDA: OpenDrainLine,
    SCL: OpenDrainLine,
    D: DelayLoop,
{
    /// Create an engine with a board-specific delay primitive
    pub fn with_delay(sda: SDA, scl: SCL, delay: D, config: WireConfig) -> Self {
        Self {
            sda,
            scl,
            delay,
            delay_loops: config.preset.delay_loops(),
            stretch_limit: config.stretch_limit,
            active: false,
        }
    }

    /// Join the bus as master
    ///
    /// Configures both lines as open-drain outputs and releases them to the
    /// idle-high state.
    pub fn begin(&mut self) -> Result<(), Error> {
        self.scl.set_open_drain();
        self.sda.set_open_drain();
        self.set_clock(true)?;
        self.set_data(true);
        self.active = true;
        debug!("bus started, {=u16} delay loops", self.delay_loops);
        Ok(())
    }

    /// Leave the bus
    ///
    /// Both lines are reconfigured as inputs. No further bus activity
    /// happens until the next [`begin`](Self::begin).
    pub fn end(&mut self) {
        self.scl.set_input();
        self.sda.set_input();
        self.active = false;
        debug!("bus released");
    }

    /// Check if the engine is between `begin()` and `end()`
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Select the delay preset for a standard bus frequency
    ///
    /// 400 kHz selects the fast preset; 100 kHz and anything unrecognized
    /// select standard. Takes effect on the next primitive.
    pub fn set_speed(&mut self, frequency_hz: u32) {
        self.set_preset(SpeedPreset::from_frequency(frequency_hz));
    }

    /// Select a speed preset directly
    pub fn set_preset(&mut self, preset: SpeedPreset) {
        self.delay_loops = preset.delay_loops();
        debug!("bus speed set to {=u32} Hz", preset.frequency());
    }

    /// Current delay-loop count
    pub fn delay_loops(&self) -> u16 {
        self.delay_loops
    }

    /// Give back the lines and delay
    pub fn release(self) -> (SDA, SCL, D) {
        (self.sda, self.scl, self.delay)
    }

    /// Drive SCL, waiting out clock stretching when releasing it
    pub fn set_clock(&mut self, high: bool) -> Result<(), Error> {
        self.delay.delay_loops(self.delay_loops);
        self.scl.set_level(high);
        if high {
            self.wait_for_clock()?;
        }
        Ok(())
    }

    /// Drive SDA
    pub fn set_data(&mut self, high: bool) {
        self.delay.delay_loops(self.delay_loops);
        self.sda.set_level(high);
    }

    /// Start condition from idle: SDA falls while SCL is high
    pub fn start(&mut self) -> Result<(), Error> {
        self.set_data(false);
        self.set_clock(false)
    }

    /// Stop condition: SDA rises while SCL is high, leaving the bus idle
    pub fn stop(&mut self) -> Result<(), Error> {
        self.set_data(false);
        self.set_clock(true)?;
        self.set_data(true);
        Ok(())
    }

    /// Repeated start without releasing the bus
    ///
    /// Leaves SCL high and SDA low; the following [`start`](Self::start)
    /// only has to pull SCL low to complete it.
    pub fn repeated_start(&mut self) -> Result<(), Error> {
        self.set_data(true);
        self.set_clock(true)?;
        self.set_data(false);
        Ok(())
    }

    /// Clock the ninth bit and sample the slave's acknowledgment
    ///
    /// Returns true if the slave pulled SDA low.
    pub fn get_ack(&mut self) -> Result<bool, Error> {
        self.set_clock(false)?;
        self.set_data(true);
        self.set_clock(true)?;
        let ack = self.sda.is_low();
        self.set_clock(false)?;
        Ok(ack)
    }

    /// Acknowledge a received byte (more bytes wanted)
    pub fn send_ack(&mut self) -> Result<(), Error> {
        self.set_data(false);
        self.set_clock(true)?;
        self.set_clock(false)
    }

    /// Refuse a received byte (it was the last one)
    pub fn send_nack(&mut self) -> Result<(), Error> {
        self.set_data(true);
        self.set_clock(true)?;
        self.set_clock(false)
    }

    /// Clock in one byte from the slave, MSB first
    pub fn shift_in_byte(&mut self) -> Result<u8, Error> {
        let mut byte = 0u8;
        self.set_data(true);

        for bit in (0..8).rev() {
            self.set_clock(true)?;
            if self.sda.is_high() {
                byte |= 1 << bit;
            }
            self.set_clock(false)?;
        }

        Ok(byte)
    }

    /// Clock out one byte to the slave, MSB first
    pub fn shift_out_byte(&mut self, value: u8) -> Result<(), Error> {
        for bit in (0..8).rev() {
            self.set_data(value & (1 << bit) != 0);
            self.set_clock(true)?;
            self.set_clock(false)?;
        }
        Ok(())
    }

    fn wait_for_clock(&mut self) -> Result<(), Error> {
        match self.stretch_limit {
            // No timeout: a slave that never lets go hangs the engine
            None => {
                while self.scl.is_low() {
                    core::hint::spin_loop();
                }
            }
            Some(limit) => {
                let mut polls = 0u32;
                while self.scl.is_low() {
                    if polls >= limit {
                        warn!("SCL held low for {=u32} polls", polls);
                        return Err(Error::ClockStretchTimeout);
                    }
                    polls += 1;
                }
            }
        }
        Ok(())
    }
}
