//! Section descriptors for scanned and written hex memory files.

use std::sync::OnceLock;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Attributes of a section
    pub struct SectionFlags : u32 {
        /// The section occupies memory at run time
        const ALLOC = 0x0001;
        /// The section is loaded from the file into memory
        const LOAD = 0x0002;
        /// The section has contents in the file
        const HAS_CONTENTS = 0x0004;
        /// The section holds executable code
        const CODE = 0x0008;
        /// The section holds initialized data
        const DATA = 0x0010;
        /// The section is read-only
        const READONLY = 0x0020;
    }
}

impl SectionFlags {
    /// Flags given to every section discovered while scanning a file.
    pub const SCANNED: SectionFlags = SectionFlags::HAS_CONTENTS
        .union(SectionFlags::LOAD)
        .union(SectionFlags::ALLOC);

    /// Returns `true` if contents written to a section with these flags end up in the file.
    #[must_use]
    pub fn is_loadable(self) -> bool {
        self.contains(SectionFlags::ALLOC | SectionFlags::LOAD)
    }
}

/// A contiguous span of bytes discovered in a hex memory file.
///
/// Sections are created by the scanner during detection and only carry their size at that
/// point. The bytes are read from the input on first request and kept for the lifetime of
/// the owning [`crate::VerilogFile`].
#[derive(Debug)]
pub struct Section {
    /// Positional name, `.sec1` for the first section of a file
    pub name: String,
    /// Section attributes
    pub flags: SectionFlags,
    /// Address of the first byte
    pub vma: u64,
    /// Load address of the first byte, equal to `vma` for scanned sections
    pub lma: u64,
    /// Number of bytes in the section
    pub size: u64,
    /// Offset of the address marker that opened the section
    pub filepos: usize,
    pub(crate) contents: OnceLock<Vec<u8>>,
}

impl Section {
    pub(crate) fn new(index: usize, address: u64, filepos: usize) -> Self {
        Section {
            name: format!(".sec{}", index),
            flags: SectionFlags::SCANNED,
            vma: address,
            lma: address,
            size: 0,
            filepos,
            contents: OnceLock::new(),
        }
    }

    /// Address one past the last byte, or `None` if that overflows 64 bits.
    #[must_use]
    pub fn end(&self) -> Option<u64> {
        self.vma.checked_add(self.size)
    }

    /// Returns `true` if the contents have already been read from the input.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.contents.get().is_some()
    }
}

/// A section registered on a [`crate::VerilogWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSection {
    /// Name of the section
    pub name: String,
    /// Section attributes; only `ALLOC | LOAD` sections are written
    pub flags: SectionFlags,
    /// Load address of the first byte
    pub lma: u64,
    /// Number of bytes in the section
    pub size: u64,
}
