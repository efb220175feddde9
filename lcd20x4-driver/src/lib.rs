//! HD44780 20x4 character display driver
//!
//! Drives a 4 row x 20 column HD44780-compatible display through a
//! PCF8574 I2C port expander, with the controller in 4-bit mode.
//!
//! - [`encoder`]: splits a byte into the 4-byte nibble/enable burst
//! - [`command`]: controller instruction set, geometry and init sequence
//! - [`lcd`]: the [`Lcd20x4`] session exposing the high-level operations
//!
//! ```ignore
//! let bus = BlockingI2c::new(i2c);
//! let mut lcd = Lcd20x4::init(bus, delay, Lcd20x4Config::default())
//!     .map_err(|e| *e.error())?;
//! lcd.set_cursor(1, 4);
//! lcd.print(format_args!("T={}C", 21));
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod encoder;
pub mod error;
pub mod lcd;
mod text;

#[cfg(test)]
mod mock;

pub use command::{LineMode, COLUMNS, ROWS};
pub use config::Lcd20x4Config;
pub use encoder::{ControlLines, Register};
pub use error::{Error, InitError};
pub use lcd::Lcd20x4;
