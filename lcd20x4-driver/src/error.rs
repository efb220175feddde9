//! Driver errors

/// Errors reported by the display driver
///
/// `E` is the transport error of the underlying [`lcd20x4_hal::I2cBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// No expander acknowledged any of the candidate addresses
    DeviceNotFound,
    /// A bus transfer failed
    Bus(E),
}


/// Failed [`crate::Lcd20x4::init`], with the bus and delay handed back
///
/// Call [`InitError::release`] to recover the resources and retry, e.g.
/// when the backpack powers up after the host.
pub struct InitError<B, D, E> {
    error: Error<E>,
    bus: B,
    delay: D,
}

impl<B, D, E> InitError<B, D, E> {
    pub(crate) fn new(error: Error<E>, bus: B, delay: D) -> Self {
        Self { error, bus, delay }
    }

    /// Cause of the failure
    pub fn error(&self) -> &Error<E> {
        &self.error
    }

    /// Recover the bus and delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D, E: core::fmt::Debug> core::fmt::Debug for InitError<B, D, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl<B, D, E: defmt::Format> defmt::Format for InitError<B, D, E> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "InitError: {}", self.error)
    }
}
