//! Input sources and low-level byte access.
//!
//! This module abstracts over where hex memory file text comes from. Detection and section
//! reads both need random access to the input (a section is re-read from the offset where it
//! was discovered), so every source is exposed through the [`crate::file::Backend`] trait
//! which hands out bounds-checked slices of the whole input.
//!
//! # Key Components
//!
//! - [`crate::file::Backend`] - Trait for different data sources
//! - [`crate::file::Memory`] - In-memory buffer backend
//! - [`crate::file::Physical`] - Memory-mapped file backend for disk access
//! - [`crate::file::parser::Parser`] - Cursor over a byte slice used by the token scanner
//!
//! # Examples
//!
//! ```rust
//! use verihex::file::{Backend, Memory};
//!
//! let memory = Memory::new(b"@0000 01 02".to_vec());
//! assert_eq!(memory.len(), 11);
//! assert_eq!(memory.data_slice(0, 1)?, b"@");
//! # Ok::<(), verihex::Error>(())
//! ```

pub mod parser;

mod memory;
mod physical;

pub use memory::Memory;
pub use physical::Physical;

use crate::Result;

/// Backend trait for file data sources.
///
/// This trait abstracts over the source of the input text, allowing for both in-memory and
/// on-disk representations. All implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the backend holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks that `offset..offset + len` lies within `data` and returns that slice.
pub(crate) fn checked_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let Some(offset_end) = offset.checked_add(len) else {
        return Err(out_of_bounds_error!());
    };

    if offset_end > data.len() {
        return Err(out_of_bounds_error!());
    }

    Ok(&data[offset..offset_end])
}
