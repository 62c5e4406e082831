//! # verihex Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the verihex library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all verihex operations
pub use crate::Error;

/// The result type used throughout verihex
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Hex memory files opened for reading and writing
pub use crate::{VerilogFile, VerilogWriter};

/// Format options
pub use crate::{Config, Dialect};

/// Format detection
pub use crate::{probe, ObjectFormat, VerilogFormat};

// ================================================================================================
// Sections and Records
// ================================================================================================

/// Section descriptors and attributes
pub use crate::{OutputSection, Section, SectionFlags};

/// Queued output
pub use crate::{Record, RecordList};

// ================================================================================================
// Low-level Access
// ================================================================================================

/// Input backends
pub use crate::file::{Backend, Memory, Physical};

/// Byte cursor
pub use crate::Parser;
