//! I2C bus abstractions
//!
//! [`I2cBus`] is the transport contract the display driver is written
//! against. [`BlockingI2c`] adapts any blocking `embedded-hal` 1.0 I2C
//! master to it.

use embedded_hal::i2c::I2c;

/// I2C bus master as seen by the display driver
///
/// Both operations block until the transfer completes or the bus gives up.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as a single transaction
    /// * `timeout_ms` - Upper bound for the transaction
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges its address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `trials` - Number of attempts before giving up
    /// * `timeout_ms` - Upper bound for each attempt
    fn is_ready(&mut self, address: u8, trials: u8, timeout_ms: u32) -> bool;
}

/// Adapter from an `embedded-hal` I2C master to [`I2cBus`]
///
/// `embedded-hal` has no per-transaction timeout, so the `timeout_ms`
/// arguments are only honoured as far as the wrapped HAL's own bus timeout
/// goes. Readiness is probed with a one-byte read: a PCF8574 answers reads
/// with its port state, which has no effect on the attached display.
pub struct BlockingI2c<T> {
    inner: T,
}

impl<T> BlockingI2c<T>
where
    T: I2c,
{
    /// Wrap an I2C master
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped I2C master
    pub fn inner(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap and return the I2C master
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> I2cBus for BlockingI2c<T>
where
    T: I2c,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }

    fn is_ready(&mut self, address: u8, trials: u8, _timeout_ms: u32) -> bool {
        let mut scratch = [0u8; 1];
        (0..trials).any(|_| self.inner.read(address, &mut scratch).is_ok())
    }
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
        Self {
            frequency: 100_000, // PCF8574 is rated for standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_write_passes_burst_through() {
        let expectations = [I2cTransaction::write(0x27, vec![0x3C, 0x38, 0x0C, 0x08])];
        let mut bus = BlockingI2c::new(I2cMock::new(&expectations));

        assert!(bus.write(0x27, &[0x3C, 0x38, 0x0C, 0x08], 200).is_ok());

        bus.into_inner().done();
    }

    #[test]
    fn test_write_surfaces_bus_error() {
        let expectations =
            [I2cTransaction::write(0x27, vec![0x08]).with_error(ErrorKind::Other)];
        let mut bus = BlockingI2c::new(I2cMock::new(&expectations));

        assert_eq!(bus.write(0x27, &[0x08], 200), Err(ErrorKind::Other));

        bus.into_inner().done();
    }

    #[test]
    fn test_is_ready_on_first_trial() {
        let expectations = [I2cTransaction::read(0x27, vec![0xFF])];
        let mut bus = BlockingI2c::new(I2cMock::new(&expectations));

        assert!(bus.is_ready(0x27, 5, 500));

        bus.into_inner().done();
    }

    #[test]
    fn test_is_ready_retries_until_ack() {
        let expectations = [
            I2cTransaction::read(0x3F, vec![0xFF]).with_error(ErrorKind::Other),
            I2cTransaction::read(0x3F, vec![0xFF]).with_error(ErrorKind::Other),
            I2cTransaction::read(0x3F, vec![0xFF]),
        ];
        let mut bus = BlockingI2c::new(I2cMock::new(&expectations));

        assert!(bus.is_ready(0x3F, 5, 500));

        bus.into_inner().done();
    }

    #[test]
    fn test_is_ready_gives_up_after_trials() {
        let expectations = [
            I2cTransaction::read(0x27, vec![0xFF]).with_error(ErrorKind::Other),
            I2cTransaction::read(0x27, vec![0xFF]).with_error(ErrorKind::Other),
        ];
        let mut bus = BlockingI2c::new(I2cMock::new(&expectations));

        assert!(!bus.is_ready(0x27, 2, 500));

        bus.into_inner().done();
    }

    #[test]
    fn test_zero_trials_never_probes() {
        let mut bus = BlockingI2c::new(I2cMock::new(&[]));

        assert!(!bus.is_ready(0x27, 0, 500));

        bus.into_inner().done();
    }

    #[test]
    fn test_config_presets() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert_eq!(I2cConfig::FAST.frequency, 400_000);
    }
}
