//! Materialization of section contents.
//!
//! A section found by [`crate::verilog::scan::scan_sections`] only knows its address, size
//! and the offset of its opening marker. Reading it re-runs the lexer from that offset and
//! decodes exactly `size` bytes. Every address marker met on the way must match the address
//! of the next byte to be written, so an input that changed after detection is caught
//! instead of producing shifted data.

use crate::{
    verilog::{
        config::Dialect,
        lexer::{Lexer, Token},
        section::Section,
    },
    Error, Result,
};

/// Reads the contents of `section` from `data`.
///
/// Reading stops as soon as `section.size` bytes were decoded; the declared size is
/// authoritative even if more data follows.
///
/// # Errors
/// - [`crate::Error::OutOfMemory`] if the buffer for the section can not be allocated
/// - [`crate::Error::AddressMismatch`] if an address marker does not continue the section
/// - [`crate::Error::Malformed`] on a lexical error or if the input ends early
/// - [`crate::Error::OutOfBounds`] if the section offset lies outside of `data`
pub fn read_section(data: &[u8], section: &Section, dialect: Dialect) -> Result<Vec<u8>> {
    let size = usize::try_from(section.size).map_err(|_| Error::OutOfMemory(usize::MAX))?;

    let mut contents = Vec::new();
    contents
        .try_reserve_exact(size)
        .map_err(|_| Error::OutOfMemory(size))?;

    if size == 0 {
        return Ok(contents);
    }

    let mut lexer = Lexer::at(data, section.filepos)?;
    let mut markers = 0usize;

    while let Some(token) = lexer.next_token()? {
        match token {
            Token::Address { address, offset } => {
                markers += 1;
                if markers > 1 && !dialect.coalesces() {
                    return Err(malformed_error!(
                        "Section {} ends at offset {} after {} of {} bytes",
                        section.name,
                        offset,
                        contents.len(),
                        size
                    ));
                }

                let expected = section.vma.wrapping_add(contents.len() as u64);
                if address != expected {
                    return Err(Error::AddressMismatch {
                        expected,
                        found: address,
                    });
                }
            }
            Token::Byte(byte) => {
                contents.push(byte);
                if contents.len() == size {
                    return Ok(contents);
                }
            }
        }
    }

    Err(malformed_error!(
        "Unexpected end of input in section {} after {} of {} bytes",
        section.name,
        contents.len(),
        size
    ))
}
