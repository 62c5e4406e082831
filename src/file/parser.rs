//! Low-level byte cursor used by the token scanner.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor over a byte slice
//! with bounds-checked single-byte access and random seeking. The hex memory file grammar is
//! byte oriented with at most one byte of lookahead, so the cursor only deals in single bytes
//! and runs of bytes matching a predicate.
//!
//! # Examples
//!
//! ```rust
//! use verihex::Parser;
//!
//! let data = b"@10 AB";
//! let mut parser = Parser::new(data);
//!
//! assert_eq!(parser.read_byte()?, b'@');
//! assert_eq!(parser.read_while(|c| c.is_ascii_hexdigit()), b"10");
//! parser.seek(4)?;
//! assert_eq!(parser.peek_byte()?, b'A');
//! # Ok::<(), verihex::Error>(())
//! ```

use crate::Result;

/// A cursor over a byte slice.
///
/// `Parser` keeps a position inside the borrowed data and validates every access against
/// the data length, so scanning truncated input reports [`crate::Error::OutOfBounds`]
/// instead of panicking.
pub struct Parser<'a> {
    /// The text being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing would exceed the data length.
    pub fn advance(&mut self) -> Result<()> {
        if self.position + 1 > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position += 1;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }
        Ok(self.data[self.position])
    }

    /// Read the next byte and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read the next byte if there is one, without treating end of data as an error.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }

    /// Consume the longest run of bytes matching `predicate` and return it.
    ///
    /// The first non-matching byte is left in place. Returns an empty slice if the
    /// current byte does not match or the data is exhausted.
    pub fn read_while<F>(&mut self, predicate: F) -> &'a [u8]
    where
        F: Fn(u8) -> bool,
    {
        let start = self.position;
        let run = self.data[start..]
            .iter()
            .take_while(|&&c| predicate(c))
            .count();
        self.position += run;
        &self.data[start..self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_read_byte_and_bounds() {
        let mut parser = Parser::new(b"ab");
        assert_eq!(parser.read_byte().unwrap(), b'a');
        assert_eq!(parser.read_byte().unwrap(), b'b');
        assert!(!parser.has_more_data());
        assert!(matches!(parser.read_byte(), Err(Error::OutOfBounds)));
        assert_eq!(parser.next_byte(), None);
    }

    #[test]
    fn test_seek() {
        let mut parser = Parser::new(b"0123");
        parser.seek(3).unwrap();
        assert_eq!(parser.peek_byte().unwrap(), b'3');
        assert_eq!(parser.pos(), 3);
        assert!(matches!(parser.seek(4), Err(Error::OutOfBounds)));
        assert_eq!(parser.pos(), 3);
    }

    #[test]
    fn test_read_while() {
        let mut parser = Parser::new(b"1aF9 rest");
        let run = parser.read_while(|c| c.is_ascii_hexdigit());
        assert_eq!(run, b"1aF9");
        assert_eq!(parser.pos(), 4);

        let run = parser.read_while(|c| c.is_ascii_hexdigit());
        assert!(run.is_empty());
        assert_eq!(parser.peek_byte().unwrap(), b' ');
    }

    #[test]
    fn test_read_while_to_end() {
        let mut parser = Parser::new(b"FFFF");
        assert_eq!(parser.read_while(|c| c.is_ascii_hexdigit()), b"FFFF");
        assert!(!parser.has_more_data());
        assert!(parser.read_while(|_| true).is_empty());
    }

    #[test]
    fn test_advance() {
        let mut parser = Parser::new(b"x");
        parser.advance().unwrap();
        assert!(matches!(parser.advance(), Err(Error::OutOfBounds)));
    }

    #[test]
    fn test_empty() {
        let parser = Parser::new(b"");
        assert!(parser.is_empty());
        assert_eq!(parser.len(), 0);
        assert!(parser.peek_byte().is_err());
    }
}
