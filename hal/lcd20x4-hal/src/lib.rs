//! lcd20x4 Hardware Abstraction Layer
//!
//! This crate defines the bus seam between the display driver and the
//! host platform. The driver only ever needs two things from the bus:
//! a blocking write of a short burst to a 7-bit address, and a readiness
//! probe used once while resolving the expander address.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lcd20x4-driver (Lcd20x4 session)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lcd20x4-hal (this crate - I2cBus)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded_hal::i2c::I2c (chip HAL)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - blocking write and readiness probe

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{BlockingI2c, I2cBus, I2cConfig};
