//! Configuration type definitions
//!
//! Timing is expressed as a delay-loop count applied before every line
//! change, not as a frequency. Only two presets exist; anything finer is
//! the job of a board-specific [`DelayLoop`](softwire_hal::DelayLoop).

use softwire_hal::I2cConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Delay loops for standard mode (~90 kHz on a 72 MHz Cortex-M3)
pub const STANDARD_DELAY_LOOPS: u16 = 3;

/// Delay loops for fast mode (~240 kHz on a 72 MHz Cortex-M3)
pub const FAST_DELAY_LOOPS: u16 = 1;

/// Bus speed preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedPreset {
    /// 100 kHz nominal
    #[default]
    Standard,
    /// 400 kHz nominal
    Fast,
}

impl SpeedPreset {
    /// Map a requested bus frequency onto a preset
    ///
    /// Only 400 kHz selects the fast preset. 100 kHz and every unrecognized
    /// value fall back to standard.
    pub const fn from_frequency(frequency_hz: u32) -> Self {
        match frequency_hz {
            400_000 => SpeedPreset::Fast,
            _ => SpeedPreset::Standard,
        }
    }

    /// Nominal bus frequency in Hz
    pub const fn frequency(self) -> u32 {
        match self {
            SpeedPreset::Standard => 100_000,
            SpeedPreset::Fast => 400_000,
        }
    }

    /// Delay-loop count applied before each line transition
    pub const fn delay_loops(self) -> u16 {
        match self {
            SpeedPreset::Standard => STANDARD_DELAY_LOOPS,
            SpeedPreset::Fast => FAST_DELAY_LOOPS,
        }
    }
}

impl From<I2cConfig> for SpeedPreset {
    fn from(config: I2cConfig) -> Self {
        Self::from_frequency(config.frequency)
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WireConfig {
    /// Initial speed preset
    pub preset: SpeedPreset,
    /// Maximum number of SCL polls while a slave stretches the clock
    ///
    /// `None` waits forever: a slave that never releases SCL hangs the
    /// engine. `Some(n)` aborts the transaction with a clock-stretch
    /// timeout after `n` polls.
    pub stretch_limit: Option<u32>,
}

impl WireConfig {
    /// Standard preset, unbounded clock stretching
    pub const STANDARD: Self = Self {
        preset: SpeedPreset::Standard,
        stretch_limit: None,
    };

    /// Fast preset, unbounded clock stretching
    pub const FAST: Self = Self {
        preset: SpeedPreset::Fast,
        stretch_limit: None,
    };

    /// Bound clock stretching to `polls` reads of SCL
    pub const fn with_stretch_limit(mut self, polls: u32) -> Self {
        self.stretch_limit = Some(polls);
        self
    }
}

impl From<SpeedPreset> for WireConfig {
    fn from(preset: SpeedPreset) -> Self {
        Self {
            preset,
            stretch_limit: None,
        }
    }
}

impl From<I2cConfig> for WireConfig {
    fn from(config: I2cConfig) -> Self {
        SpeedPreset::from(config).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_mapping() {
        assert_eq!(SpeedPreset::from_frequency(400_000), SpeedPreset::Fast);
        assert_eq!(SpeedPreset::from_frequency(100_000), SpeedPreset::Standard);

        // Unrecognized frequencies fall back to standard
        assert_eq!(SpeedPreset::from_frequency(1_000_000), SpeedPreset::Standard);
        assert_eq!(SpeedPreset::from_frequency(0), SpeedPreset::Standard);
        assert_eq!(SpeedPreset::from_frequency(399_999), SpeedPreset::Standard);
    }

    #[test]
    fn test_preset_delay_loops() {
        assert_eq!(SpeedPreset::Standard.delay_loops(), 3);
        assert_eq!(SpeedPreset::Fast.delay_loops(), 1);
        assert!(SpeedPreset::Fast.delay_loops() < SpeedPreset::Standard.delay_loops());
    }

    #[test]
    fn test_from_i2c_config() {
        assert_eq!(WireConfig::from(I2cConfig::FAST), WireConfig::FAST);
        assert_eq!(WireConfig::from(I2cConfig::STANDARD), WireConfig::STANDARD);
        assert_eq!(WireConfig::default(), WireConfig::STANDARD);
    }

    #[test]
    fn test_stretch_limit() {
        let config = WireConfig::FAST.with_stretch_limit(500);
        assert_eq!(config.preset, SpeedPreset::Fast);
        assert_eq!(config.stretch_limit, Some(500));
    }
}
