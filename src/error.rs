use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::Malformed`] - The text violates the hex memory file grammar
/// - [`Error::AddressMismatch`] - A section re-read found an address that does not continue it
/// - [`Error::OutOfBounds`] - Attempted to read beyond a section or the input
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::NotSupported`] - The input is not a Verilog hex file
///
/// ## Usage Errors
/// - [`Error::SectionNotFound`] - A section index that does not exist
/// - [`Error::InvalidConfig`] - A configuration value outside of its allowed range
///
/// ## Resource Errors
/// - [`Error::OutOfMemory`] - A section buffer could not be allocated
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust,no_run
/// use verihex::{Error, VerilogFile};
/// use std::path::Path;
///
/// match VerilogFile::from_file(Path::new("memory.hex")) {
///     Ok(file) => println!("{} sections", file.sections().len()),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be parsed.
    ///
    /// Raised for every scanner transition without a valid next state: a bad comment start,
    /// an unterminated block comment, an `@` without digits, a truncated hex pair, a stray
    /// character, or data that appears before any address.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An address marker inside a section does not match the running address.
    ///
    /// The input changed between detection and the content read, or the file was
    /// edited into an inconsistent state. The section contents can not be trusted.
    #[error("Address mismatch - expected 0x{expected:X}, found 0x{found:X}")]
    AddressMismatch {
        /// The address the section reader expected next
        expected: u64,
        /// The address that was present in the input
        found: u64,
    },

    /// An out of bound access was attempted.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// A section buffer of the given size could not be allocated.
    #[error("Failed to allocate {0} bytes")]
    OutOfMemory(usize),

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// This file type is not supported.
    #[error("This file type is not supported")]
    NotSupported,

    /// The requested section index does not exist.
    #[error("Section {0} does not exist")]
    SectionNotFound(usize),

    /// A configuration value is outside of its allowed range.
    #[error("Invalid configuration - {0}")]
    InvalidConfig(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors from opening, mapping or writing files. A failed
    /// write during commit leaves the remaining records unwritten.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}
