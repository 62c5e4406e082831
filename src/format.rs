//! The seam between a file format implementation and its host.
//!
//! A host that handles several binary formats drives each of them through the same three
//! entry points: detect-and-parse on open, lazy content reads per section, and serialization
//! of queued output on commit. [`ObjectFormat`] names those entry points;
//! [`crate::verilog::VerilogFormat`] is the implementation for hex memory files.

use std::io::Write;

use crate::{
    file::Backend,
    verilog::{section::Section, writer::RecordList},
    Result,
};

/// A binary file format that can be detected, read section by section, and written.
pub trait ObjectFormat {
    /// Short name of the format.
    fn name(&self) -> &'static str;

    /// Checks whether `input` is in this format and returns the sections it contains.
    ///
    /// Only section boundaries are determined here; contents are left unread.
    ///
    /// # Errors
    /// Returns an error if `input` is not in this format. A host probing several formats
    /// treats any error as "try the next one".
    fn object_p(&self, input: &dyn Backend) -> Result<Vec<Section>>;

    /// Reads the contents of a section previously returned by [`ObjectFormat::object_p`].
    ///
    /// # Errors
    /// Returns an error if the contents can not be read or are inconsistent with the section.
    fn read_section(&self, input: &dyn Backend, section: &Section) -> Result<Vec<u8>>;

    /// Serializes `records` to `out`.
    ///
    /// # Errors
    /// Returns an error as soon as writing to `out` fails.
    fn write_object_contents(&self, records: &RecordList, out: &mut dyn Write) -> Result<()>;
}
