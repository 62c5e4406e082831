//! Token scanner for the hex memory file grammar.
//!
//! The scanner yields two token classes: address markers (`@` followed by hex digits) and
//! data bytes (two adjacent hex digits). Whitespace and comments between tokens are consumed
//! silently. Comments follow C++ syntax (`// ...` up to the end of the line, `/* ... */`
//! without nesting) and are only recognized at token boundaries.
//!
//! Any byte sequence without a valid continuation is reported as
//! [`crate::Error::Malformed`]; the scanner never tries to resynchronize.

use crate::{
    file::parser::Parser,
    verilog::hex::{decode_address, decode_byte, is_hex_digit, ADDRESS_MARKER},
    Result,
};

/// A single token of the hex memory file grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// An address marker.
    Address {
        /// The decoded address
        address: u64,
        /// Offset of the `@` character within the input
        offset: usize,
    },
    /// One data byte encoded as two hex digits.
    Byte(u8),
}

/// Whitespace as understood by C's `isspace` in the "C" locale.
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Byte-oriented lexer over hex memory file text.
pub struct Lexer<'a> {
    parser: Parser<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Lexer {
            parser: Parser::new(data),
        }
    }

    /// Creates a lexer positioned at `offset` within `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is not inside `data`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut parser = Parser::new(data);
        parser.seek(offset)?;
        Ok(Lexer { parser })
    }

    /// Current offset of the lexer within the input.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.parser.pos()
    }

    /// Returns the next token, or `None` once the input is exhausted.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a bad or unterminated comment, an address
    /// marker without digits, an incomplete hex pair, or any other unexpected character.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let offset = self.parser.pos();
            let Some(c) = self.parser.next_byte() else {
                return Ok(None);
            };

            if is_space(c) {
                continue;
            }

            if c == b'/' {
                self.skip_comment(offset)?;
                continue;
            }

            if c == ADDRESS_MARKER {
                let digits = self.parser.read_while(is_hex_digit);
                if digits.is_empty() {
                    return Err(malformed_error!(
                        "Address marker at offset {} is not followed by hex digits",
                        offset
                    ));
                }
                let address = decode_address(digits)?;
                return Ok(Some(Token::Address { address, offset }));
            }

            if is_hex_digit(c) {
                let Some(low) = self.parser.next_byte() else {
                    return Err(malformed_error!(
                        "Incomplete hex pair at offset {}: unexpected end of input",
                        offset
                    ));
                };
                let Some(byte) = decode_byte([c, low]) else {
                    return Err(malformed_error!(
                        "Invalid hex pair at offset {}: 0x{:02X} is not a hex digit",
                        offset,
                        low
                    ));
                };
                return Ok(Some(Token::Byte(byte)));
            }

            return Err(malformed_error!(
                "Unexpected character 0x{:02X} at offset {}",
                c,
                offset
            ));
        }
    }

    /// Consumes the remainder of a comment whose leading `/` was already read.
    fn skip_comment(&mut self, start: usize) -> Result<()> {
        match self.parser.next_byte() {
            Some(b'/') => {
                while let Some(c) = self.parser.next_byte() {
                    if c == b'\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some(b'*') => loop {
                match self.parser.next_byte() {
                    Some(b'*') => {
                        if self.parser.peek_byte().ok() == Some(b'/') {
                            self.parser.advance()?;
                            return Ok(());
                        }
                    }
                    Some(_) => {}
                    None => {
                        return Err(malformed_error!(
                            "Block comment starting at offset {} is not terminated",
                            start
                        ))
                    }
                }
            },
            _ => Err(malformed_error!("Malformed comment at offset {}", start)),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
