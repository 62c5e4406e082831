//! Physical file backend for memory-mapped I/O.
//!
//! [`crate::file::Physical`] maps a hex memory file read-only into the address space. Section
//! reads seek back to the offset where a section was discovered, so the whole file has to stay
//! randomly accessible for the lifetime of a [`crate::VerilogFile`]; a mapping gives that
//! without copying the text up front.
//!
//! # Examples
//!
//! ```rust,no_run
//! use verihex::file::{Backend, Physical};
//! use std::path::Path;
//!
//! let physical = Physical::new(Path::new("memory.hex"))?;
//! println!("File size: {} bytes", physical.len());
//! let first = physical.data_slice(0, 1)?;
//! assert_eq!(first, b"@");
//! # Ok::<(), verihex::Error>(())
//! ```

use super::{checked_slice, Backend};
use crate::{Error::FileError, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for access to files on disk.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the hex file on disk. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;

        Self::from_std_file(file)
    }

    /// Creates a new physical file backend from an opened [`std::fs::File`].
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if memory mapping fails.
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_std_file(file: fs::File) -> Result<Physical> {
        // The mapping is read-only; the file must not be truncated while it is alive.
        let mmap = unsafe { Mmap::map(&file) }.map_err(FileError)?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        checked_slice(&self.data, offset, len)
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
