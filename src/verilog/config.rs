//! Dialect and layout options for reading and writing hex memory files.

use strum::{Display, EnumIter};

use crate::{verilog::hex::AddressWidth, Error, Result};

/// Largest number of data bytes written on one line.
pub const MAX_BYTES_PER_LINE: usize = 16;

/// The flavour of hex memory file being read or written.
///
/// Both dialects share the token grammar; they differ in where addresses appear and in how
/// wide they are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Dialect {
    /// Every data line starts with its own 32-bit address.
    ///
    /// On read, an address that continues the open section is folded into it, so a file
    /// written one line at a time comes back as contiguous sections.
    #[default]
    #[strum(serialize = "per-line")]
    PerLine,
    /// One 64-bit address on its own line at the start of each record.
    ///
    /// On read, every address opens a new section.
    #[strum(serialize = "standard")]
    Standard,
}

impl Dialect {
    /// Width of the addresses this dialect writes.
    #[must_use]
    pub fn address_width(self) -> AddressWidth {
        match self {
            Dialect::PerLine => AddressWidth::Bits32,
            Dialect::Standard => AddressWidth::Bits64,
        }
    }

    /// Whether an address continuing the open section extends it instead of opening a new one.
    #[must_use]
    pub fn coalesces(self) -> bool {
        matches!(self, Dialect::PerLine)
    }
}

/// Options shared by [`crate::VerilogFile`] and [`crate::VerilogWriter`].
///
/// # Examples
///
/// ```rust
/// use verihex::{Config, Dialect};
///
/// let config = Config::default()
///     .with_dialect(Dialect::Standard)
///     .with_bytes_per_line(8);
/// assert!(config.validate().is_ok());
/// assert!(Config::default().with_bytes_per_line(17).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The dialect used to interpret addresses
    pub dialect: Dialect,
    /// Number of data bytes per output line, `1..=16`
    pub bytes_per_line: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dialect: Dialect::default(),
            bytes_per_line: MAX_BYTES_PER_LINE,
        }
    }
}

impl Config {
    /// Returns the configuration with `dialect` selected.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Returns the configuration writing `bytes_per_line` bytes per data line.
    #[must_use]
    pub fn with_bytes_per_line(mut self, bytes_per_line: usize) -> Self {
        self.bytes_per_line = bytes_per_line;
        self
    }

    /// Checks that all values are within their allowed ranges.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `bytes_per_line` is not in `1..=16`.
    pub fn validate(&self) -> Result<()> {
        if self.bytes_per_line == 0 || self.bytes_per_line > MAX_BYTES_PER_LINE {
            return Err(Error::InvalidConfig(format!(
                "bytes_per_line must be between 1 and {}, got {}",
                MAX_BYTES_PER_LINE, self.bytes_per_line
            )));
        }
        Ok(())
    }
}
