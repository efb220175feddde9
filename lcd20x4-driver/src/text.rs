//! Fixed-capacity line buffer for formatted output

use core::fmt;

use heapless::Vec;

use crate::command::COLUMNS;

/// Byte shown for characters outside ASCII
const REPLACEMENT: u8 = b'?';

/// One display row worth of character codes
///
/// Formatting into a full buffer drops the excess silently instead of
/// failing, so a long template still prints its first [`COLUMNS`] cells.
/// A NUL character ends the line; nothing after it is kept.
pub(crate) struct LineBuffer {
    bytes: Vec<u8, { COLUMNS as usize }>,
    terminated: bool,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        Self {
            bytes: Vec::new(),
            terminated: false,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.terminated {
                break;
            }
            if ch == '\0' {
                self.terminated = true;
                break;
            }
            let code = if ch.is_ascii() { ch as u8 } else { REPLACEMENT };
            if self.bytes.push(code).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_formats_arguments() {
        let mut line = LineBuffer::new();
        write!(line, "T={}C {:>3}%", 21, 7).unwrap();
        assert_eq!(line.as_bytes(), b"T=21C   7%");
    }

    #[test]
    fn test_truncates_at_display_width() {
        let mut line = LineBuffer::new();
        write!(line, "{}", "ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap();
        assert_eq!(line.as_bytes(), b"ABCDEFGHIJKLMNOPQRST");
    }

    #[test]
    fn test_truncates_across_writes() {
        let mut line = LineBuffer::new();
        line.write_str("0123456789").unwrap();
        line.write_str("0123456789").unwrap();
        line.write_str("overflow").unwrap();
        assert_eq!(line.as_bytes().len(), 20);
    }

    #[test]
    fn test_nul_ends_line() {
        let mut line = LineBuffer::new();
        write!(line, "a{}b", '\0').unwrap();
        line.write_str("more").unwrap();
        assert_eq!(line.as_bytes(), b"a");
    }

    #[test]
    fn test_non_ascii_takes_one_cell() {
        let mut line = LineBuffer::new();
        line.write_str("21°C").unwrap();
        assert_eq!(line.as_bytes(), b"21?C");
    }
}
