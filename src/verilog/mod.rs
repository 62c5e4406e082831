//! Verilog hex memory file reading and writing.
//!
//! Verilog hex memory files (the input of `$readmemh`) hold nothing but addresses and data.
//! The text is a sequence of tokens separated by whitespace and C++ style comments:
//!
//! - `@` followed by hex digits sets the address of the next data byte
//! - two hex digits give the value of one data byte
//!
//! ```text
//! @00001000 01 AE 3F 45 12 \r\n
//! ```
//!
//! # Architecture
//!
//! - [`crate::verilog::hex`] - Conversion between bytes/addresses and hex digits
//! - [`crate::verilog::lexer`] - Token scanner with comment skipping
//! - [`crate::verilog::scan`] - Section discovery during detection
//! - [`crate::verilog::reader`] - Lazy reading of section contents
//! - [`crate::verilog::writer`] - Address-ordered output records and serialization
//! - [`crate::verilog::config`] - Dialect and line layout options
//!
//! Opening a file ([`VerilogFile`]) scans it once to find section boundaries. The contents of
//! a section are decoded on first access and cached. Writing ([`VerilogWriter`]) collects
//! byte ranges in memory and produces the text on commit.
//!
//! # Examples
//!
//! ```rust
//! use verihex::{SectionFlags, VerilogFile, VerilogWriter};
//!
//! let mut writer = VerilogWriter::default();
//! let text = writer.make_section(".text", SectionFlags::ALLOC | SectionFlags::LOAD, 0x1000, 4);
//! writer.set_section_contents(text, 0, &[0xDE, 0xAD, 0xBE, 0xEF])?;
//! let bytes = writer.to_vec()?;
//! assert_eq!(bytes, b"@00001000 DE AD BE EF \r\n");
//!
//! let file = VerilogFile::from_mem(bytes)?;
//! assert_eq!(file.sections()[0].vma, 0x1000);
//! assert_eq!(file.section_contents(0)?, &[0xDE, 0xAD, 0xBE, 0xEF]);
//! # Ok::<(), verihex::Error>(())
//! ```

pub mod config;
pub mod hex;
pub mod lexer;
pub mod reader;
pub mod scan;
pub mod section;
pub mod writer;

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    file::{checked_slice, Backend, Memory, Physical},
    format::ObjectFormat,
    Error, Result,
};

pub use config::{Config, Dialect};
pub use section::{OutputSection, Section, SectionFlags};
pub use writer::{Record, RecordList};

/// The hex memory file format, as seen by a host that dispatches over formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerilogFormat {
    config: Config,
}

impl VerilogFormat {
    /// Creates the format with the given options.
    #[must_use]
    pub fn new(config: Config) -> Self {
        VerilogFormat { config }
    }

    /// The options this format reads and writes with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Checks whether `data` is a hex memory file without keeping the sections.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] if `data` is empty or does not scan cleanly.
    pub fn detect(&self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::NotSupported);
        }

        match scan::scan_sections(data, self.config.dialect) {
            Ok(_) => Ok(()),
            Err(error) => {
                log::debug!("Input is not a {} hex memory file: {}", self.config.dialect, error);
                Err(Error::NotSupported)
            }
        }
    }
}

impl ObjectFormat for VerilogFormat {
    fn name(&self) -> &'static str {
        "verilog"
    }

    fn object_p(&self, input: &dyn Backend) -> Result<Vec<Section>> {
        scan::scan_sections(input.data(), self.config.dialect)
    }

    fn read_section(&self, input: &dyn Backend, section: &Section) -> Result<Vec<u8>> {
        reader::read_section(input.data(), section, self.config.dialect)
    }

    fn write_object_contents(&self, records: &RecordList, out: &mut dyn Write) -> Result<()> {
        writer::write_records(out, records, &self.config)
    }
}

/// Returns `true` if `data` is a well-formed hex memory file in the default dialect.
///
/// Empty input is not considered a hex memory file.
#[must_use]
pub fn probe(data: &[u8]) -> bool {
    VerilogFormat::default().detect(data).is_ok()
}

/// A hex memory file opened for reading.
///
/// The file is scanned once when opened; [`VerilogFile::sections`] lists what was found.
/// Section contents are read on first access and kept until the file is dropped.
pub struct VerilogFile {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
    format: VerilogFormat,
    sections: Vec<Section>,
}

impl VerilogFile {
    /// Opens and scans the hex memory file at `path` with the default options.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can not be opened or mapped,
    /// [`crate::Error::Empty`] for an empty file, and [`crate::Error::Malformed`] if the
    /// text is not a hex memory file.
    pub fn from_file(path: &Path) -> Result<VerilogFile> {
        Self::from_file_with_config(path, Config::default())
    }

    /// Opens and scans the hex memory file at `path`.
    ///
    /// # Errors
    /// See [`VerilogFile::from_file`]; additionally [`crate::Error::InvalidConfig`].
    pub fn from_file_with_config(path: &Path, config: Config) -> Result<VerilogFile> {
        let input = Physical::new(path)?;

        Self::load(input, config)
    }

    /// Scans a hex memory file held in memory with the default options.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for an empty buffer and [`crate::Error::Malformed`] if
    /// the text is not a hex memory file.
    pub fn from_mem(data: Vec<u8>) -> Result<VerilogFile> {
        Self::from_mem_with_config(data, Config::default())
    }

    /// Scans a hex memory file held in memory.
    ///
    /// # Errors
    /// See [`VerilogFile::from_mem`]; additionally [`crate::Error::InvalidConfig`].
    pub fn from_mem_with_config(data: Vec<u8>, config: Config) -> Result<VerilogFile> {
        let input = Memory::new(data);

        Self::load(input, config)
    }

    fn load<T: Backend + 'static>(data: T, config: Config) -> Result<VerilogFile> {
        config.validate()?;

        if data.is_empty() {
            return Err(Error::Empty);
        }

        let format = VerilogFormat::new(config);
        let sections = format.object_p(&data)?;
        log::debug!(
            "Found {} sections in {} bytes of {} input",
            sections.len(),
            data.len(),
            config.dialect
        );

        Ok(VerilogFile {
            data: Box::new(data),
            format,
            sections,
        })
    }

    /// The sections found in the file, in file order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the section at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::SectionNotFound`] if there is no such section.
    pub fn section(&self, index: usize) -> Result<&Section> {
        self.sections
            .get(index)
            .ok_or(Error::SectionNotFound(index))
    }

    /// Returns the index of the section called `name`.
    #[must_use]
    pub fn section_by_name(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.name == name)
    }

    /// Returns the full contents of the section at `index`.
    ///
    /// The first call for a section decodes it from the input; later calls return the
    /// cached bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::SectionNotFound`] for an unknown index, or the error of
    /// [`crate::verilog::reader::read_section`] if the contents can not be decoded.
    pub fn section_contents(&self, index: usize) -> Result<&[u8]> {
        let section = self.section(index)?;
        if let Some(contents) = section.contents.get() {
            return Ok(contents.as_slice());
        }

        let contents = self.format.read_section(self.data.as_ref(), section)?;
        log::debug!(
            "Read {} bytes of {} at 0x{:X}",
            contents.len(),
            section.name,
            section.vma
        );
        Ok(section.contents.get_or_init(|| contents).as_slice())
    }

    /// Returns `count` bytes of the section at `index`, starting `offset` bytes into it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not inside the section, plus the
    /// errors of [`VerilogFile::section_contents`].
    pub fn get_section_contents(&self, index: usize, offset: usize, count: usize) -> Result<&[u8]> {
        let contents = self.section_contents(index)?;
        checked_slice(contents, offset, count)
    }

    /// The options the file was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        self.format.config()
    }

    /// Returns the total size of the input in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the input has a length of zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw input text.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }
}

/// A hex memory file being built for output.
///
/// Sections are registered with [`VerilogWriter::make_section`] and filled with
/// [`VerilogWriter::set_section_contents`]. Nothing is written until the output is committed
/// with [`VerilogWriter::write_to`], [`VerilogWriter::to_vec`] or [`VerilogWriter::save`].
#[derive(Debug, Default)]
pub struct VerilogWriter {
    format: VerilogFormat,
    sections: Vec<OutputSection>,
    records: RecordList,
}

impl VerilogWriter {
    /// Creates an empty writer.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if `config` is invalid.
    pub fn new(config: Config) -> Result<VerilogWriter> {
        config.validate()?;

        Ok(VerilogWriter {
            format: VerilogFormat::new(config),
            sections: Vec::new(),
            records: RecordList::new(),
        })
    }

    /// Registers a section and returns its index.
    pub fn make_section(
        &mut self,
        name: impl Into<String>,
        flags: SectionFlags,
        lma: u64,
        size: u64,
    ) -> usize {
        let section = OutputSection {
            name: name.into(),
            flags,
            lma,
            size,
        };
        log::debug!(
            "Created output section {} at 0x{:X} ({} bytes, {:?})",
            section.name,
            lma,
            size,
            flags
        );
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// The sections registered so far.
    #[must_use]
    pub fn sections(&self) -> &[OutputSection] {
        &self.sections
    }

    /// Queues `data` for output at `offset` bytes into the section at `index`.
    ///
    /// The bytes are copied. Writes to sections that are not both `ALLOC` and `LOAD`, and
    /// empty writes, are accepted and dropped.
    ///
    /// # Errors
    /// Returns [`crate::Error::SectionNotFound`] for an unknown index and
    /// [`crate::Error::OutOfBounds`] if the write extends past the end of the section.
    pub fn set_section_contents(&mut self, index: usize, offset: u64, data: &[u8]) -> Result<()> {
        let section = self
            .sections
            .get(index)
            .ok_or(Error::SectionNotFound(index))?;

        let end = offset
            .checked_add(data.len() as u64)
            .ok_or(Error::OutOfBounds)?;
        if end > section.size {
            return Err(out_of_bounds_error!());
        }

        if data.is_empty() || !section.flags.is_loadable() {
            return Ok(());
        }

        let address = section.lma.wrapping_add(offset);
        self.records.insert(Record::new(address, data));
        Ok(())
    }

    /// The queued records in address order.
    #[must_use]
    pub fn records(&self) -> &RecordList {
        &self.records
    }

    /// The options output is written with.
    #[must_use]
    pub fn config(&self) -> &Config {
        self.format.config()
    }

    /// Writes all queued records to `out`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] as soon as a write fails.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        self.format.write_object_contents(&self.records, &mut out)
    }

    /// Returns the serialized file.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfig`] if the writer's options are invalid.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Writes all queued records to a new file at `path`.
    ///
    /// If a write fails the file is left with the lines written so far.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can not be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = fs::File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{hex_lines, pattern};

    fn loadable() -> SectionFlags {
        SectionFlags::ALLOC | SectionFlags::LOAD
    }

    #[test]
    fn probe_detects_format() {
        assert!(probe(b"@0 00"));
        assert!(probe(b"// comment only\n"));
        assert!(!probe(b""));
        assert!(!probe(b"\x7fELF"));
        assert!(!probe(b":10000000"));
    }

    #[test]
    fn detect_reports_not_supported() {
        let standard = VerilogFormat::new(Config::default().with_dialect(Dialect::Standard));
        assert!(standard.detect(b"@0000000000000000\r\n00\r\n").is_ok());
        assert!(matches!(standard.detect(b""), Err(Error::NotSupported)));
        assert!(matches!(
            standard.detect(b"PK\x03\x04"),
            Err(Error::NotSupported)
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(VerilogFile::from_mem(vec![]), Err(Error::Empty)));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(
            VerilogFile::from_mem(b"@100 4Z".to_vec()),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn contents_are_cached() {
        let file = VerilogFile::from_mem(b"@10 01 02 03".to_vec()).unwrap();
        assert!(!file.sections()[0].is_loaded());

        let first = file.section_contents(0).unwrap().as_ptr();
        assert!(file.sections()[0].is_loaded());
        let second = file.section_contents(0).unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn partial_contents() {
        let file = VerilogFile::from_mem(b"@10 01 02 03 04".to_vec()).unwrap();
        assert_eq!(file.get_section_contents(0, 1, 2).unwrap(), &[2, 3]);
        assert!(matches!(
            file.get_section_contents(0, 3, 2),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(
            file.get_section_contents(1, 0, 1),
            Err(Error::SectionNotFound(1))
        ));
    }

    #[test]
    fn section_lookup() {
        let file = VerilogFile::from_mem(b"@0 01 @10 02".to_vec()).unwrap();
        assert_eq!(file.section_by_name(".sec2"), Some(1));
        assert_eq!(file.section_by_name(".data"), None);
        assert_eq!(file.section(1).unwrap().vma, 0x10);
    }

    #[test]
    fn non_loadable_writes_are_dropped() {
        let mut writer = VerilogWriter::default();
        let debug = writer.make_section(".debug", SectionFlags::HAS_CONTENTS, 0, 4);
        let bss = writer.make_section(".bss", SectionFlags::ALLOC, 0x100, 4);
        writer.set_section_contents(debug, 0, &[1, 2, 3, 4]).unwrap();
        writer.set_section_contents(bss, 0, &[0; 4]).unwrap();
        assert!(writer.records().is_empty());
        assert!(writer.to_vec().unwrap().is_empty());
    }

    #[test]
    fn empty_write_is_dropped() {
        let mut writer = VerilogWriter::default();
        let text = writer.make_section(".text", loadable(), 0, 4);
        writer.set_section_contents(text, 4, &[]).unwrap();
        assert!(writer.records().is_empty());
    }

    #[test]
    fn write_errors() {
        let mut writer = VerilogWriter::default();
        let text = writer.make_section(".text", loadable(), 0, 4);
        assert!(matches!(
            writer.set_section_contents(text, 2, &[0; 3]),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(
            writer.set_section_contents(7, 0, &[0]),
            Err(Error::SectionNotFound(7))
        ));
    }

    #[test]
    fn offset_is_relative_to_lma() {
        let mut writer = VerilogWriter::default();
        let data = writer.make_section(".data", loadable(), 0x8000, 0x100);
        writer.set_section_contents(data, 0x20, &[0xAA]).unwrap();
        assert_eq!(writer.records().iter().next().unwrap().address, 0x8020);
    }

    #[test]
    fn invalid_config() {
        let config = Config::default().with_bytes_per_line(20);
        assert!(matches!(
            VerilogWriter::new(config),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            VerilogFile::from_mem_with_config(b"@0 00".to_vec(), config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn writer_matches_hand_built_text() {
        let data = pattern(20, 7);
        let mut writer = VerilogWriter::default();
        let text = writer.make_section(".text", loadable(), 0x400, 20);
        writer.set_section_contents(text, 0, &data).unwrap();

        let expected = hex_lines(&[(0x400, &data[..16]), (0x410, &data[16..])]);
        assert_eq!(writer.to_vec().unwrap(), expected);
    }

    #[test]
    fn reads_hand_built_text() {
        let low = pattern(16, 1);
        let high = pattern(3, 9);
        let text = hex_lines(&[(0x0, &low), (0x10, &high), (0x100, &high)]);

        let file = VerilogFile::from_mem(text).unwrap();
        assert_eq!(file.sections().len(), 2);
        assert_eq!(file.sections()[0].size, 19);
        assert_eq!(&file.section_contents(0).unwrap()[..16], low.as_slice());
        assert_eq!(file.section_contents(1).unwrap(), high.as_slice());
    }

    #[test]
    fn format_name() {
        assert_eq!(VerilogFormat::default().name(), "verilog");
    }
}
