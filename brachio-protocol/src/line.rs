//! Byte stream to line assembly
//!
//! Serial input arrives in arbitrary chunks. [`LineAssembler`] collects bytes
//! until `\n` or `\r` and hands back complete, non-empty lines.

use heapless::String;

/// Maximum line length accepted on the serial link
pub const MAX_LINE_LEN: usize = 96;

/// Errors reported while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer; the rest of it is discarded
    LineTooLong,
}

/// Line assembly state machine
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize = MAX_LINE_LEN> {
    buffer: String<N>,
    /// Dropping bytes until the next terminator
    overflowed: bool,
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            overflowed: false,
        }
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` on a terminator that ends a non-empty line,
    /// `Ok(None)` when more bytes are needed, and `Err` once per overlong line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<N>>, LineError> {
        match byte {
            b'\n' | b'\r' => {
                let overflowed = self.overflowed;
                self.overflowed = false;
                if overflowed || self.buffer.is_empty() {
                    self.buffer.clear();
                    return Ok(None);
                }
                let line = self.buffer.clone();
                self.buffer.clear();
                Ok(Some(line))
            }
            _ if self.overflowed => Ok(None),
            _ => {
                // Non-ASCII bytes cannot be part of a valid command
                let c = if byte.is_ascii() { byte as char } else { '?' };
                if self.buffer.push(c).is_err() {
                    self.buffer.clear();
                    self.overflowed = true;
                    return Err(LineError::LineTooLong);
                }
                Ok(None)
            }
        }
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all<const N: usize>(
        asm: &mut LineAssembler<N>,
        bytes: &[u8],
    ) -> heapless::Vec<Result<String<N>, LineError>, 8> {
        let mut out = heapless::Vec::new();
        for &b in bytes {
            match asm.feed(b) {
                Ok(Some(line)) => out.push(Ok(line)).unwrap(),
                Ok(None) => {}
                Err(e) => out.push(Err(e)).unwrap(),
            }
        }
        out
    }

    #[test]
    fn test_lines_split_on_newline_and_cr() {
        let mut asm: LineAssembler = LineAssembler::new();
        let lines = feed_all(&mut asm, b"G28\r\nG1 X10\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "G28");
        assert_eq!(lines[1].as_ref().unwrap().as_str(), "G1 X10");
        assert_eq!(asm.pending(), 0);
    }

    #[test]
    fn test_partial_line_is_kept_across_chunks() {
        let mut asm: LineAssembler = LineAssembler::new();
        assert!(feed_all(&mut asm, b"G1 X").is_empty());
        assert_eq!(asm.pending(), 4);
        let lines = feed_all(&mut asm, b"5\n");
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "G1 X5");
    }

    #[test]
    fn test_overlong_line_reported_once_and_dropped() {
        let mut asm = LineAssembler::<4>::new();
        let lines = feed_all(&mut asm, b"G1 X100\nM5\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Err(LineError::LineTooLong));
        assert_eq!(lines[1].as_ref().unwrap().as_str(), "M5");
    }

    #[test]
    fn test_reset_discards_partial_line() {
        let mut asm: LineAssembler = LineAssembler::new();
        feed_all(&mut asm, b"G1 X");
        asm.reset();
        let lines = feed_all(&mut asm, b"M3\n");
        assert_eq!(lines[0].as_ref().unwrap().as_str(), "M3");
    }
}
