//! Output accumulation and serialization.
//!
//! Writes are collected as [`Record`]s in a [`RecordList`] kept sorted by start address and
//! only turned into text when the output is committed. Records are never merged; each one
//! is split into lines of at most `bytes_per_line` bytes when written.
//!
//! # Line layout
//!
//! [`Dialect::PerLine`] repeats the address in front of every line:
//!
//! ```text
//! @00001000 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F 10 \r\n
//! @00001010 11 12 \r\n
//! ```
//!
//! [`Dialect::Standard`] writes the address once per record:
//!
//! ```text
//! @0000000000001000\r\n
//! 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F 10 \r\n
//! 11 12 \r\n
//! ```

use std::io::Write;

use crate::{
    verilog::{
        config::{Config, Dialect},
        hex::{encode_address, encode_byte},
    },
    Result,
};

const LINE_END: &[u8] = b"\r\n";

/// A block of bytes queued for output at an absolute address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Address of the first byte
    pub address: u64,
    /// The bytes, copied from the caller at queue time
    pub data: Vec<u8>,
}

impl Record {
    /// Creates a record holding a copy of `data`.
    #[must_use]
    pub fn new(address: u64, data: &[u8]) -> Self {
        Record {
            address,
            data: data.to_vec(),
        }
    }

    /// Number of bytes in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the record holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Records ordered by ascending start address.
///
/// Appending a record whose address is not below the last one is O(1); anything else is
/// placed with a binary search. Records with equal addresses keep their insertion order.
#[derive(Debug, Default, Clone)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        RecordList::default()
    }

    /// Inserts `record` at its sorted position.
    pub fn insert(&mut self, record: Record) {
        log::trace!(
            "Queued {} bytes at 0x{:X}",
            record.data.len(),
            record.address
        );

        match self.records.last() {
            Some(last) if record.address < last.address => {
                let position = self
                    .records
                    .partition_point(|queued| queued.address <= record.address);
                self.records.insert(position, record);
            }
            _ => self.records.push(record),
        }
    }

    /// Iterates over the records in address order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of queued records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Appends `bytes` as space-terminated hex pairs followed by a line break.
fn encode_data_line(line: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        line.extend_from_slice(&encode_byte(byte));
        line.push(b' ');
    }
    line.extend_from_slice(LINE_END);
}

/// Serializes one record.
fn write_record<W: Write + ?Sized>(out: &mut W, record: &Record, config: &Config) -> Result<()> {
    let width = config.dialect.address_width();
    let last = record
        .address
        .saturating_add((record.len() as u64).saturating_sub(1));
    if !width.fits(last) {
        log::warn!(
            "Record at 0x{:X} exceeds {} addresses and will be truncated",
            record.address,
            width
        );
    }

    let mut line = Vec::with_capacity(3 * config.bytes_per_line + 20);

    if config.dialect == Dialect::Standard {
        line.extend_from_slice(&encode_address(record.address, width));
        line.extend_from_slice(LINE_END);
        out.write_all(&line)?;
    }

    let mut written = 0usize;
    for chunk in record.data.chunks(config.bytes_per_line) {
        line.clear();
        if config.dialect == Dialect::PerLine {
            let address = record.address.wrapping_add(written as u64);
            line.extend_from_slice(&encode_address(address, width));
            line.push(b' ');
        }
        encode_data_line(&mut line, chunk);
        out.write_all(&line)?;
        written += chunk.len();
    }

    Ok(())
}

/// Serializes all records of `records` to `out`, in address order.
///
/// # Errors
/// Returns [`crate::Error::InvalidConfig`] for an invalid `config`, and
/// [`crate::Error::FileError`] as soon as a write fails; nothing after the failing line is
/// written.
pub fn write_records<W: Write + ?Sized>(
    out: &mut W,
    records: &RecordList,
    config: &Config,
) -> Result<()> {
    config.validate()?;

    for record in records {
        write_record(out, record, config)?;
    }

    out.flush()?;
    Ok(())
}
