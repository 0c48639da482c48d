//! Error adapter for converting ProtomapError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`ProtomapError::Schema`] may carry several diagnostics and a
//! [`ProtomapError::Batch`] several failed inputs; each diagnostic and each
//! failure is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use protomap::{
    ProtomapError,
    diagnostic::{Diagnostic, ErrorCode, Severity},
};

/// Adapter for a single protomap diagnostic.
///
/// Schema diagnostics point at a record type and field rather than at a
/// span of source text, so the location is folded into the message.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// The schema file the diagnostic was raised for
    file: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, file: &'a str) -> Self {
        Self { diag, file }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("file", &self.file)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.diag.message())?;
        if let Some(location) = self.diag.location() {
            write!(f, " (at `{location}`)")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

/// Adapter for non-diagnostic [`ProtomapError`] variants.
///
/// This adapter handles errors that don't carry schema diagnostics, such as
/// I/O errors, configuration errors, compiler failures and render errors.
pub struct ErrorAdapter<'a> {
    err: &'a ProtomapError,
    /// The input file that failed, when known
    input: Option<String>,
}

impl<'a> ErrorAdapter<'a> {
    pub fn new(err: &'a ProtomapError, input: Option<String>) -> Self {
        Self { err, input }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.err, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.input {
            Some(input) => write!(f, "{input}: {}", self.err),
            None => fmt::Display::fmt(&self.err, f),
        }
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.err.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match self.err {
            ProtomapError::Io(_) => Box::new("protomap::io"),
            ProtomapError::Config(_) => Box::new("protomap::config"),
            ProtomapError::Pattern { .. } => Box::new(ErrorCode::E001),
            ProtomapError::Schema { .. } => Box::new(ErrorCode::E100),
            ProtomapError::Compiler(_) => Box::new("protomap::compiler"),
            ProtomapError::Render(_) => Box::new("protomap::render"),
            ProtomapError::Batch(_) => Box::new("protomap::batch"),
        };
        Some(code)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err {
            ProtomapError::Pattern { .. } => Some(Box::new(
                "exclusion patterns use regular expression syntax",
            )),
            ProtomapError::Compiler(_) => Some(Box::new(
                "check the input path and the -I/--proto-path import roots",
            )),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A schema diagnostic with its record type and field location.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`ProtomapError`] into a list of reportable errors.
///
/// For [`ProtomapError::Schema`], this returns one [`Reportable`] for each
/// diagnostic in the error. [`ProtomapError::Batch`] is flattened into the
/// reportables of every failed input. Other variants yield a single
/// [`Reportable`].
pub fn to_reportables(err: &ProtomapError) -> Vec<Reportable<'_>> {
    reportables_for(err, None)
}

fn reportables_for(err: &ProtomapError, input: Option<String>) -> Vec<Reportable<'_>> {
    match err {
        ProtomapError::Schema { file, diagnostics } if !diagnostics.is_empty() => diagnostics
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, file)))
            .collect(),
        ProtomapError::Batch(failures) => failures
            .iter()
            .flat_map(|(path, err)| reportables_for(err, Some(path.display().to_string())))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter::new(err, input))],
    }
}
