//! Error codes for the protomap diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Configuration errors
//! - `E1xx` - Ingestion errors
//! - `E2xx` - Resolution errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Configuration Errors (E0xx)
    // =========================================================================
    /// Invalid exclusion pattern.
    ///
    /// An exclusion pattern is not a valid regular expression.
    E001,

    // =========================================================================
    // Ingestion Errors (E1xx)
    // =========================================================================
    /// Schema file could not be ingested.
    ///
    /// The schema compiler failed, or its descriptor output could not be
    /// read or decoded. Other input files are still processed.
    E100,

    /// Malformed descriptor.
    ///
    /// A field has a value kind or multiplicity that is not recognized, or
    /// names a type that is not part of the descriptor data. The enclosing
    /// record type is not mapped.
    E101,

    /// Output name already used.
    ///
    /// Two schema files map to the same output file name within one run.
    /// The later schema file is not written so that the earlier output is
    /// kept intact.
    E102,

    // =========================================================================
    // Resolution Errors (E2xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// A message-typed field names a record type that is not declared
    /// anywhere in its scope chain. The field is rendered without an edge.
    E200,
}

impl ErrorCode {
    /// Returns a short description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid exclusion pattern",
            ErrorCode::E100 => "schema file could not be ingested",
            ErrorCode::E101 => "malformed descriptor",
            ErrorCode::E102 => "output name already used",
            ErrorCode::E200 => "unresolved reference",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
