//! Transfer status and error types
//!
//! Every transaction ends in exactly one [`TransferStatus`]. Missing
//! devices and NACKs are ordinary outcomes, never panics.

/// Outcome of one transaction
///
/// The numeric codes follow the Wire `endTransmission()` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransferStatus {
    /// All bytes transferred and acknowledged
    Success = 0,
    /// More bytes were queued than the transmit buffer holds; the bus was
    /// not touched
    DataTooLong = 1,
    /// No device acknowledged the address byte
    AddressNack = 2,
    /// The device stopped acknowledging partway through a write
    DataNack = 3,
    /// The engine is not between `begin()` and `end()`
    BusInactive = 4,
    /// A slave held SCL low longer than the configured stretch limit
    ClockStretchTimeout = 5,
}

impl TransferStatus {
    /// Wire-compatible status code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Check for success
    pub const fn is_success(self) -> bool {
        matches!(self, TransferStatus::Success)
    }

    /// Convert into a `Result` for `?` propagation
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            TransferStatus::Success => Ok(()),
            TransferStatus::DataTooLong => Err(Error::DataTooLong),
            TransferStatus::AddressNack => Err(Error::AddressNack),
            TransferStatus::DataNack => Err(Error::DataNack),
            TransferStatus::BusInactive => Err(Error::BusInactive),
            TransferStatus::ClockStretchTimeout => Err(Error::ClockStretchTimeout),
        }
    }
}

impl From<Result<(), Error>> for TransferStatus {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => TransferStatus::Success,
            Err(e) => e.into(),
        }
    }
}

/// Error from a failed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Transmit buffer overflowed before the transaction was sent
    DataTooLong,
    /// Address not acknowledged
    AddressNack,
    /// Data byte not acknowledged
    DataNack,
    /// Bus used before `begin()` or after `end()`
    BusInactive,
    /// Clock stretched past the configured limit
    ClockStretchTimeout,
}

impl From<Error> for TransferStatus {
    fn from(e: Error) -> Self {
        match e {
            Error::DataTooLong => TransferStatus::DataTooLong,
            Error::AddressNack => TransferStatus::AddressNack,
            Error::DataNack => TransferStatus::DataNack,
            Error::BusInactive => TransferStatus::BusInactive,
            Error::ClockStretchTimeout => TransferStatus::ClockStretchTimeout,
        }
    }
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

        match self {
            Error::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            Error::DataNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            Error::DataTooLong => ErrorKind::Overrun,
            Error::BusInactive => ErrorKind::Bus,
            Error::ClockStretchTimeout => ErrorKind::Other,
        }
    }
}
