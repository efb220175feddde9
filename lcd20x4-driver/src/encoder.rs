//! Nibble encoder for the PCF8574 bridge
//!
//! The expander drives the display lines directly from the byte it
//! receives:
//!
//! ```text
//!   bit:  7   6   5   4   3    2   1   0
//!        D7  D6  D5  D4  BL   EN  RW  RS
//! ```
//!
//! In 4-bit mode a byte crosses as two nibbles, high first. Each nibble is
//! written twice, once with EN high and once with EN low; the controller
//! latches on the falling edge. One byte therefore costs a 4-byte burst.

/// Control line bits (low half of every expander byte)
pub mod ctrl {
    /// Register select: 0 = instruction, 1 = data
    pub const RS: u8 = 1 << 0;
    /// Read/write: always 0, the driver only writes
    pub const RW: u8 = 1 << 1;
    /// Enable strobe
    pub const EN: u8 = 1 << 2;
    /// Backlight transistor
    pub const BACKLIGHT: u8 = 1 << 3;
}

/// Controller register targeted by a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Instruction register (RS low)
    Command,
    /// Data register (RS high)
    Data,
}

/// Control lines asserted for every byte of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLines {
    pub register: Register,
    pub backlight: bool,
}

impl ControlLines {
    pub fn new(register: Register, backlight: bool) -> Self {
        Self {
            register,
            backlight,
        }
    }

    /// Control bits with EN released
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.register == Register::Data {
            bits |= ctrl::RS;
        }
        if self.backlight {
            bits |= ctrl::BACKLIGHT;
        }
        bits
    }
}

/// Encode one byte into the EN-bracketed nibble burst
pub fn encode(value: u8, lines: ControlLines) -> [u8; 4] {
    let high = value & 0xF0;
    let low = (value << 4) & 0xF0;
    let bits = lines.bits();

    [
        high | bits | ctrl::EN,
        high | bits,
        low | bits | ctrl::EN,
        low | bits,
    ]
}

/// Decode a burst produced by [`encode`]
///
/// Returns the transferred byte and the control lines, or `None` if the
/// burst does not follow the EN high/low pattern with stable data and
/// control lines across each nibble.
pub fn decode(burst: &[u8; 4]) -> Option<(u8, ControlLines)> {
    let [high_en, high, low_en, low] = *burst;

    let strobed = high_en & ctrl::EN != 0 && low_en & ctrl::EN != 0;
    let released = high & ctrl::EN == 0 && low & ctrl::EN == 0;
    if !strobed || !released || high & ctrl::RW != 0 || low & ctrl::RW != 0 {
        return None;
    }
    if high_en & !ctrl::EN != high || low_en & !ctrl::EN != low {
        return None;
    }

    let bits = high & 0x0F;
    if bits != low & 0x0F {
        return None;
    }

    let register = if bits & ctrl::RS != 0 {
        Register::Data
    } else {
        Register::Command
    };
    let lines = ControlLines::new(register, bits & ctrl::BACKLIGHT != 0);

    Some(((high & 0xF0) | (low >> 4), lines))
}
