//! Driver configuration

/// Default 7-bit addresses of common PCF8574 backpacks (PCF8574, PCF8574A)
pub const DEFAULT_ADDRESSES: [u8; 2] = [0x27, 0x3F];

/// Display driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lcd20x4Config {
    /// Candidate 7-bit expander addresses, probed in order
    pub addresses: [u8; 2],
    /// Probe attempts per candidate address
    pub probe_trials: u8,
    /// Timeout for each probe attempt in ms
    pub probe_timeout_ms: u32,
    /// Timeout for each burst write in ms
    pub write_timeout_ms: u32,
    /// Backlight state after initialization
    pub backlight: bool,
}

impl Default for Lcd20x4Config {
    fn default() -> Self {
        Self {
            addresses: DEFAULT_ADDRESSES,
            probe_trials: 5,
            probe_timeout_ms: 500,
            write_timeout_ms: 200,
            backlight: true,
        }
    }
}

impl Lcd20x4Config {
    /// Probe a single known address instead of the default pair
    pub fn with_address(address: u8) -> Self {
        Self {
            addresses: [address, address],
            ..Self::default()
        }
    }
}
