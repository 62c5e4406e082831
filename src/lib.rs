// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # verihex
//!
//! A reader and writer for Verilog hex memory dump files, the text format consumed by
//! `$readmemh` and produced by `objcopy -O verilog`.
//!
//! ## Features
//!
//! - **Section discovery** - A single scan finds every contiguous span of bytes in a file
//! - **Lazy contents** - Section bytes are decoded on first access and cached
//! - **Consistency checks** - Address markers inside a section are validated while reading
//! - **Ordered output** - Byte ranges written in any order are emitted by ascending address
//! - **Two dialects** - Address on every line (default) or once per block
//!
//! ## Reading
//!
//! ```rust,no_run
//! use verihex::VerilogFile;
//! use std::path::Path;
//!
//! let file = VerilogFile::from_file(Path::new("firmware.hex"))?;
//! for (index, section) in file.sections().iter().enumerate() {
//!     let bytes = file.section_contents(index)?;
//!     println!("{} at 0x{:08X}: {} bytes", section.name, section.vma, bytes.len());
//! }
//! # Ok::<(), verihex::Error>(())
//! ```
//!
//! ## Writing
//!
//! ```rust,no_run
//! use verihex::{SectionFlags, VerilogWriter};
//!
//! let mut writer = VerilogWriter::default();
//! let text = writer.make_section(".text", SectionFlags::ALLOC | SectionFlags::LOAD, 0x0, 2);
//! writer.set_section_contents(text, 0, &[0x13, 0x00])?;
//! writer.save("firmware.hex")?;
//! # Ok::<(), verihex::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result`]. Malformed input is reported as
//! [`Error::Malformed`] with the location in this crate that rejected it.

#[macro_use]
pub(crate) mod error;

/// Input sources and the byte cursor used for scanning.
pub mod file;

/// The entry points a host uses to drive a file format.
pub mod format;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// Shared fixtures for unit tests
#[cfg(test)]
pub(crate) mod test;

/// Verilog hex memory file scanning, reading and writing.
pub mod verilog;

/// `verihex` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `verihex` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use verihex::{Error, VerilogFile};
///
/// match VerilogFile::from_mem(b"@100 4Z".to_vec()) {
///     Ok(_) => unreachable!(),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

pub use file::parser::Parser;
pub use format::ObjectFormat;
pub use verilog::{
    probe, Config, Dialect, OutputSection, Record, RecordList, Section, SectionFlags,
    VerilogFile, VerilogFormat, VerilogWriter,
};
