//! 20x4 display session
//!
//! [`Lcd20x4`] owns the bus, the delay provider and the resolved expander
//! address. It only exists after [`Lcd20x4::init`] found the expander and
//! ran the power-on sequence, so no operation can reach an unresolved
//! address.
//!
//! High-level operations do not report bus failures: a failed transfer is
//! logged, counted in [`Lcd20x4::bus_errors`] and otherwise ignored. Use
//! [`Lcd20x4::send_command`] and [`Lcd20x4::send_data`] when the transport
//! result matters.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use lcd20x4_hal::I2cBus;

use crate::command::{self, LineMode};
use crate::config::Lcd20x4Config;
use crate::encoder::{self, ControlLines, Register};
use crate::error::{Error, InitError};
use crate::text::LineBuffer;

/// HD44780 20x4 display behind a PCF8574 expander
pub struct Lcd20x4<B, D> {
    bus: B,
    delay: D,
    config: Lcd20x4Config,
    /// Resolved 7-bit expander address
    address: u8,
    backlight: bool,
    /// Transfers dropped since init
    bus_errors: u32,
}

impl<B, D> Lcd20x4<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Find the expander and bring the controller up in 4-bit mode
    ///
    /// The candidate addresses are probed in order, a repeated candidate
    /// only once. If none answers, the bus is left untouched after the
    /// probes and an [`InitError`] carrying `DeviceNotFound` hands the bus
    /// and delay back for a retry. Failures while sending the init
    /// sequence itself are counted like any other dropped transfer.
    pub fn init(
        mut bus: B,
        mut delay: D,
        config: Lcd20x4Config,
    ) -> Result<Self, InitError<B, D, B::Error>> {
        delay.delay_ms(command::POWER_ON_DELAY_MS);

        let candidates = &config.addresses;
        let address = candidates
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, addr)| !candidates[..i].contains(&addr))
            .map(|(_, addr)| addr)
            .find(|&addr| bus.is_ready(addr, config.probe_trials, config.probe_timeout_ms));

        let Some(address) = address else {
            #[cfg(feature = "defmt")]
            defmt::warn!("lcd20x4: no expander at {:#x}", config.addresses);
            return Err(InitError::new(Error::DeviceNotFound, bus, delay));
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("lcd20x4: expander at {=u8:#x}", address);

        let mut lcd = Self {
            bus,
            delay,
            backlight: config.backlight,
            config,
            address,
            bus_errors: 0,
        };

        lcd.delay.delay_ms(command::RESET_DELAY_MS);
        for step in command::INIT_SEQUENCE {
            lcd.command(step.command);
            lcd.delay.delay_ms(step.settle_ms);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("lcd20x4: initialized, {=u32} dropped transfers", lcd.bus_errors);

        Ok(lcd)
    }

    /// Resolved 7-bit expander address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Number of transfers whose bus write failed since init
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    pub fn config(&self) -> &Lcd20x4Config {
        &self.config
    }

    /// Current backlight state
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Release the bus and delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Send one instruction byte
    pub fn send_command(&mut self, command: u8) -> Result<(), Error<B::Error>> {
        self.transfer(command, Register::Command)
    }

    /// Send one character code to DDRAM at the cursor
    pub fn send_data(&mut self, data: u8) -> Result<(), Error<B::Error>> {
        self.transfer(data, Register::Data)
    }

    /// Move the cursor to `row` (0-3), `col` (0-19)
    ///
    /// Out-of-range positions are ignored.
    pub fn set_cursor(&mut self, row: u8, col: u8) {
        if let Some(cmd) = command::set_cursor(row, col) {
            self.command(cmd);
        }
    }

    pub fn first_line(&mut self) {
        self.set_cursor(0, 0);
    }

    pub fn second_line(&mut self) {
        self.set_cursor(1, 0);
    }

    pub fn third_line(&mut self) {
        self.set_cursor(2, 0);
    }

    pub fn fourth_line(&mut self) {
        self.set_cursor(3, 0);
    }

    /// Move to the start of row `line` (0-3); ignored otherwise
    pub fn line(&mut self, line: u8) {
        if line < command::ROWS {
            self.set_cursor(line, 0);
        }
    }

    pub fn set_line_mode(&mut self, mode: LineMode) {
        self.command(mode.function_set());
    }

    /// Show a blinking cursor, or hide it
    ///
    /// Always leaves the display on.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.command(command::cursor_visible(visible));
    }

    /// Turn the display on or off without touching DDRAM
    ///
    /// Always leaves the cursor hidden.
    pub fn set_display_visible(&mut self, visible: bool) {
        self.command(command::display_visible(visible));
    }

    /// Blank the display and move the cursor to row 0, column 0
    pub fn clear(&mut self) {
        self.command(command::CLEAR_DISPLAY);
        self.delay.delay_ms(command::CLEAR_SETTLE_MS);
    }

    /// Move the cursor to row 0, column 0 and undo any shift
    pub fn home(&mut self) {
        self.command(command::RETURN_HOME);
        self.delay.delay_ms(command::HOME_SETTLE_MS);
    }

    /// Shift the display content `offset` cells right
    pub fn shift_right(&mut self, offset: u8) {
        for _ in 0..offset {
            self.command(command::SHIFT_DISPLAY_RIGHT);
        }
    }

    /// Shift the display content `offset` cells left
    pub fn shift_left(&mut self, offset: u8) {
        for _ in 0..offset {
            self.command(command::SHIFT_DISPLAY_LEFT);
        }
    }

    /// Switch the backlight
    ///
    /// The expander latches the backlight bit from every byte it receives,
    /// so a single control byte with EN low applies it at once.
    pub fn set_backlight(&mut self, on: bool) {
        self.backlight = on;
        let bits = ControlLines::new(Register::Command, on).bits();
        if self
            .bus
            .write(self.address, &[bits], self.config.write_timeout_ms)
            .is_err()
        {
            self.dropped(bits, Register::Command);
        }
    }

    /// Format and print at the cursor
    ///
    /// Output is cut to one display row; nothing wraps.
    pub fn print(&mut self, args: fmt::Arguments<'_>) {
        let mut line = LineBuffer::new();
        // LineBuffer never fails, an error here comes from a Display impl
        let _ = line.write_fmt(args);
        for &code in line.as_bytes() {
            self.data(code);
        }
    }

    /// Print a string at the cursor, cut to one display row
    pub fn write_str(&mut self, text: &str) {
        self.print(format_args!("{}", text));
    }

    fn transfer(&mut self, value: u8, register: Register) -> Result<(), Error<B::Error>> {
        let burst = encoder::encode(value, ControlLines::new(register, self.backlight));
        self.bus
            .write(self.address, &burst, self.config.write_timeout_ms)
            .map_err(Error::Bus)
    }

    fn command(&mut self, command: u8) {
        if self.send_command(command).is_err() {
            self.dropped(command, Register::Command);
        }
    }

    fn data(&mut self, data: u8) {
        if self.send_data(data).is_err() {
            self.dropped(data, Register::Data);
        }
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn dropped(&mut self, value: u8, register: Register) {
        self.bus_errors = self.bus_errors.saturating_add(1);

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "lcd20x4: dropped {} {=u8:#x} to {=u8:#x}",
            register,
            value,
            self.address
        );
    }
}
