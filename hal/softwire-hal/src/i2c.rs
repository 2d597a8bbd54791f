//! I2C bus abstractions
//!
//! Provides the addressed-transfer trait that bus masters implement,
//! whether backed by a hardware peripheral or by bit-banging.

/// Addressed-transfer master
///
/// Every call is one complete bus transaction from START to STOP. A device
/// that refuses its address or a data byte surfaces as `Err`, and the
/// master has already sent STOP, so the bus is idle again for the next call.
pub trait I2cBus {
    type Error;

    /// Send `data` to the 7-bit `address`
    ///
    /// An empty `data` only checks whether the device acknowledges its
    /// address, which is how bus scans find devices.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from the 7-bit `address`
    ///
    /// Every byte but the last is acknowledged; the last is NACKed so the
    /// device lets go of SDA before STOP.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Send `write_data`, then fill `read_buf` after a repeated start
    ///
    /// The bus is not released in between, so no other master can slip in
    /// between selecting a register and reading it.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
