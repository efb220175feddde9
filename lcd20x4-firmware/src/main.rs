//! lcd20x4 demo firmware
//!
//! Raspberry Pi Pico with a PCF8574 backpacked 20x4 display on I2C0
//! (GP4 = SDA, GP5 = SCL). Prints a banner on each row, then keeps an
//! uptime counter on the last row.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use lcd20x4_driver::{Lcd20x4, Lcd20x4Config, LineMode};
use lcd20x4_hal::{BlockingI2c, I2cConfig};

/// Uptime refresh interval
const REFRESH_MS: u64 = 1000;

/// Wait before probing for the display again
const RETRY_MS: u64 = 500;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("lcd20x4 demo starting...");

    let p = embassy_rp::init(Default::default());

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut bus = BlockingI2c::new(i2c);
    let mut delay = Delay;
    let mut lcd = loop {
        match Lcd20x4::init(bus, delay, Lcd20x4Config::default()) {
            Ok(lcd) => break lcd,
            Err(e) => {
                warn!("Failed to initialize display: {:?}, retrying", e.error());
                (bus, delay) = e.release();
                Timer::after_millis(RETRY_MS).await;
            }
        }
    };
    info!("Display at {=u8:#x}", lcd.address());

    lcd.set_line_mode(LineMode::Two);
    lcd.first_line();
    lcd.write_str("lcd20x4 demo");
    lcd.second_line();
    lcd.print(format_args!("addr {:#04x}", lcd.address()));
    lcd.third_line();
    lcd.write_str("this line is longer than twenty cells");

    loop {
        let secs = Instant::now().as_secs();
        lcd.line(3);
        lcd.print(format_args!("up {:>5}s err {}", secs, lcd.bus_errors()));

        Timer::after_millis(REFRESH_MS).await;
    }
}
