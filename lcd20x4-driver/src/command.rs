//! HD44780 instruction set
//!
//! Instruction bytes, the 20x4 DDRAM geometry and the power-on
//! initialization sequence for 4-bit operation.

/// Display rows
pub const ROWS: u8 = 4;
/// Display columns
pub const COLUMNS: u8 = 20;

/// DDRAM address of column 0 on each row
///
/// Rows 2 and 3 continue rows 0 and 1 in controller memory, 20 cells on.
pub const LINE_START: [u8; ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

/// Instruction opcodes
pub const CLEAR_DISPLAY: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE_SET: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const CURSOR_SHIFT: u8 = 0x10;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_DDRAM_ADDR: u8 = 0x80;

/// Entry mode flags
pub mod entry {
    /// Shift the display on every write
    pub const SHIFT: u8 = 0x01;
    /// Increment the address counter on every write
    pub const INCREMENT: u8 = 0x02;
}

/// Display control flags
pub mod display {
    pub const BLINK: u8 = 0x01;
    pub const CURSOR: u8 = 0x02;
    pub const ON: u8 = 0x04;
}

/// Cursor/display shift flags
pub mod shift {
    pub const RIGHT: u8 = 0x04;
    pub const DISPLAY: u8 = 0x08;
}

/// Function set flags
pub mod function {
    pub const FONT_5X10: u8 = 0x04;
    pub const TWO_LINE: u8 = 0x08;
    pub const EIGHT_BIT: u8 = 0x10;
}

/// Shift the whole display one cell right
pub const SHIFT_DISPLAY_RIGHT: u8 = CURSOR_SHIFT | shift::DISPLAY | shift::RIGHT;
/// Shift the whole display one cell left
pub const SHIFT_DISPLAY_LEFT: u8 = CURSOR_SHIFT | shift::DISPLAY;

/// Settle time after clear display
pub const CLEAR_SETTLE_MS: u32 = 3;
/// Settle time after return home
pub const HOME_SETTLE_MS: u32 = 2;

/// Wait after power-up before the expander is probed
pub const POWER_ON_DELAY_MS: u32 = 50;
/// Wait after the expander is found, before the first instruction
///
/// The controller needs more than 15 ms after Vcc reaches 4.5 V.
pub const RESET_DELAY_MS: u32 = 45;

/// Number of display lines the controller scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    One,
    Two,
}

impl LineMode {
    /// Function set instruction for 4-bit operation in this mode
    pub fn function_set(self) -> u8 {
        match self {
            LineMode::One => FUNCTION_SET,
            LineMode::Two => FUNCTION_SET | function::TWO_LINE,
        }
    }
}

/// One instruction of the initialization sequence and its settle time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitStep {
    pub command: u8,
    pub settle_ms: u32,
}

const fn step(command: u8, settle_ms: u32) -> InitStep {
    InitStep { command, settle_ms }
}

/// Reset-by-instruction into 4-bit mode, then the power-on configuration
///
/// The three 8-bit function sets resynchronize the controller whatever
/// mode it was left in; the fourth switches the interface to 4 bits.
pub const INIT_SEQUENCE: [InitStep; 9] = [
    step(FUNCTION_SET | function::EIGHT_BIT, 5),
    step(FUNCTION_SET | function::EIGHT_BIT, 1),
    step(FUNCTION_SET | function::EIGHT_BIT, 8),
    step(FUNCTION_SET, 8),
    step(FUNCTION_SET | function::TWO_LINE, 1),
    step(DISPLAY_CONTROL, 1),
    step(CLEAR_DISPLAY, CLEAR_SETTLE_MS),
    step(ENTRY_MODE_SET | entry::INCREMENT, 1),
    step(DISPLAY_CONTROL | display::ON, 3),
];

/// DDRAM address for a cell, or `None` outside the 4x20 grid
pub fn ddram_address(row: u8, col: u8) -> Option<u8> {
    if row >= ROWS || col >= COLUMNS {
        return None;
    }
    Some(LINE_START[row as usize] + col)
}

/// Set DDRAM address instruction for a cell
pub fn set_cursor(row: u8, col: u8) -> Option<u8> {
    ddram_address(row, col).map(|addr| SET_DDRAM_ADDR | addr)
}

/// Display control instruction for the cursor toggle
///
/// The display stays on; the cursor is either a blinking block with
/// underline or hidden entirely.
pub fn cursor_visible(visible: bool) -> u8 {
    if visible {
        DISPLAY_CONTROL | display::ON | display::CURSOR | display::BLINK
    } else {
        DISPLAY_CONTROL | display::ON
    }
}

/// Display control instruction for the display toggle
///
/// Cursor and blink are always left off.
pub fn display_visible(visible: bool) -> u8 {
    if visible {
        DISPLAY_CONTROL | display::ON
    } else {
        DISPLAY_CONTROL
    }
}
