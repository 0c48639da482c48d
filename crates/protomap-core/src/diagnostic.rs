//! Diagnostics reported while mapping a schema.
//!
//! This module provides a reporting system with:
//! - Error codes for documentation and searchability
//! - A location (record-type path and field name) pointing at the cause
//! - Severity levels
//! - A collector for accumulating diagnostics without aborting a phase
//!
//! # Overview
//!
//! A [`Diagnostic`] represents a single error or warning. Unresolved
//! references are warnings: the affected row is still rendered, only its
//! edge is missing. Malformed descriptors and unreadable schema files are
//! errors for the record type or file they concern, never for the whole run.
//!
//! # Example
//!
//! ```
//! # use protomap_core::diagnostic::{Diagnostic, ErrorCode, Location};
//! let diag = Diagnostic::warning("type `Adress` is not declared in any enclosing scope")
//!     .with_code(ErrorCode::E200)
//!     .with_location(Location::field("Person", "home"))
//!     .with_help("check the spelling of the referenced type");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "warning[E200]: type `Adress` is not declared in any enclosing scope"
//! );
//! ```

mod collector;
mod error_code;
mod location;
mod severity;

pub use collector::DiagnosticCollector;
pub use error_code::ErrorCode;
pub use location::Location;
pub use severity::Severity;

use std::fmt;

/// A diagnostic message with the location of its cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    location: Option<Location>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the location, if any.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the location of the cause.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            location: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E101]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
