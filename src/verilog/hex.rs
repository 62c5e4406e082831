//! Conversion between binary values and ASCII hex digits.
//!
//! Decoding goes through a 256-entry nibble table evaluated at compile time, so there is no
//! initialization step to run before the codec is usable. Encoding always produces uppercase
//! digits.
//!
//! # Examples
//!
//! ```rust
//! use verihex::verilog::hex::{decode_byte, encode_address, encode_byte, AddressWidth};
//!
//! assert_eq!(&encode_byte(0x3f), b"3F");
//! assert_eq!(decode_byte([b'a', b'E']), Some(0xAE));
//! assert_eq!(encode_address(0x1000, AddressWidth::Bits32), b"@00001000");
//! ```

use strum::{Display, EnumIter};

use crate::Result;

/// Marker character introducing an address token.
pub const ADDRESS_MARKER: u8 = b'@';

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Value marking a byte that is not a hex digit in [`HEX_TABLE`].
const NOT_HEX: u8 = 0xFF;

const fn build_hex_table() -> [u8; 256] {
    let mut table = [NOT_HEX; 256];
    let mut c = 0;
    while c < 256 {
        table[c] = match c as u8 {
            b'0'..=b'9' => c as u8 - b'0',
            b'a'..=b'f' => c as u8 - b'a' + 10,
            b'A'..=b'F' => c as u8 - b'A' + 10,
            _ => NOT_HEX,
        };
        c += 1;
    }
    table
}

static HEX_TABLE: [u8; 256] = build_hex_table();

/// Number of hex digits an address is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AddressWidth {
    /// Eight digits holding the low 32 bits of the address.
    #[strum(serialize = "32-bit")]
    Bits32,
    /// Sixteen digits holding the full 64-bit address.
    #[strum(serialize = "64-bit")]
    Bits64,
}

impl AddressWidth {
    /// Number of hex digits written for an address of this width.
    #[must_use]
    pub fn digits(self) -> usize {
        match self {
            AddressWidth::Bits32 => 8,
            AddressWidth::Bits64 => 16,
        }
    }

    /// Returns `true` if `address` can be written at this width without losing bits.
    #[must_use]
    pub fn fits(self, address: u64) -> bool {
        match self {
            AddressWidth::Bits32 => address <= u64::from(u32::MAX),
            AddressWidth::Bits64 => true,
        }
    }
}

/// Returns the nibble value table shared by all decoders.
///
/// The table is a compile-time constant; every call returns the same static data.
#[must_use]
pub fn hex_table() -> &'static [u8; 256] {
    &HEX_TABLE
}

/// Check if `c` is an ASCII hex digit `[0-9a-fA-F]`.
#[must_use]
pub fn is_hex_digit(c: u8) -> bool {
    HEX_TABLE[c as usize] != NOT_HEX
}

/// Decode a single hex digit into its value `0..=15`.
#[must_use]
pub fn decode_nibble(c: u8) -> Option<u8> {
    match HEX_TABLE[c as usize] {
        NOT_HEX => None,
        value => Some(value),
    }
}

/// Decode two hex digits, high nibble first.
#[must_use]
pub fn decode_byte(pair: [u8; 2]) -> Option<u8> {
    Some(decode_nibble(pair[0])? << 4 | decode_nibble(pair[1])?)
}

/// Encode a byte as two uppercase hex digits.
#[must_use]
pub fn encode_byte(byte: u8) -> [u8; 2] {
    [DIGITS[usize::from(byte >> 4)], DIGITS[usize::from(byte & 0x0f)]]
}

/// Decode a run of hex digits into an address.
///
/// Any number of digits is accepted as long as the value fits into 64 bits.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if `digits` is empty, contains a non-hex byte, or
/// overflows 64 bits.
pub fn decode_address(digits: &[u8]) -> Result<u64> {
    if digits.is_empty() {
        return Err(malformed_error!("Address marker without hex digits"));
    }

    let mut address: u64 = 0;
    for &digit in digits {
        let Some(nibble) = decode_nibble(digit) else {
            return Err(malformed_error!("Invalid hex digit 0x{:02X} in address", digit));
        };
        address = address
            .checked_mul(16)
            .and_then(|value| value.checked_add(u64::from(nibble)))
            .ok_or_else(|| {
                malformed_error!(
                    "Address '{}' exceeds 64 bits",
                    String::from_utf8_lossy(digits)
                )
            })?;
    }

    Ok(address)
}

/// Encode an address as the marker character followed by a fixed number of digits.
///
/// [`AddressWidth::Bits32`] keeps only the low 32 bits of `address`.
#[must_use]
pub fn encode_address(address: u64, width: AddressWidth) -> Vec<u8> {
    let digits = width.digits();
    let mut out = Vec::with_capacity(digits + 1);
    out.push(ADDRESS_MARKER);
    for shift in (0..digits).rev() {
        let nibble = (address >> (shift * 4)) & 0xf;
        out.push(DIGITS[nibble as usize]);
    }
    out
}
