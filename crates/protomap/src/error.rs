//! Error types for protomap operations.
//!
//! This module provides the main error type [`ProtomapError`] which wraps
//! the conditions that stop a schema from being mapped. Problems confined to
//! a single field or record type are not errors: they are reported as
//! [`Diagnostic`]s on the resulting graph.

use std::{io, path::PathBuf};

use thiserror::Error;

use protomap_core::diagnostic::Diagnostic;

/// The main error type for protomap operations.
///
/// # Diagnostic Variants
///
/// The `Schema` variant carries every diagnostic raised while ingesting one
/// schema file. `Batch` collects the failures of independent input files so
/// that one bad file never hides the results of the others.
#[derive(Debug, Error)]
pub enum ProtomapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid exclusion pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to ingest schema file {file}")]
    Schema {
        file: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("Schema compiler error: {0}")]
    Compiler(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("{} of the input files failed", .0.len())]
    Batch(Vec<(PathBuf, ProtomapError)>),
}

impl From<crate::export::Error> for ProtomapError {
    fn from(error: crate::export::Error) -> Self {
        Self::Render(error.to_string())
    }
}

impl ProtomapError {
    /// Create a new `Schema` error for a file whose ingestion failed.
    pub fn new_schema_error(file: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self::Schema {
            file: file.into(),
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use protomap_core::diagnostic::ErrorCode;

    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = ProtomapError::new_schema_error(
            "a.proto",
            vec![Diagnostic::error("unreadable").with_code(ErrorCode::E100)],
        );

        assert_eq!(err.to_string(), "Failed to ingest schema file a.proto");
    }

    #[test]
    fn test_batch_error_display() {
        let err = ProtomapError::Batch(vec![
            (PathBuf::from("a.proto"), ProtomapError::Render("x".to_string())),
            (PathBuf::from("b.proto"), ProtomapError::Compiler("y".to_string())),
        ]);

        assert_eq!(err.to_string(), "2 of the input files failed");
    }

    #[test]
    fn test_export_error_becomes_render_error() {
        let err = ProtomapError::from(crate::export::Error::Render("bad label".to_string()));

        assert!(matches!(err, ProtomapError::Render(ref msg) if msg == "Render error: bad label"));
    }
}
