//! Collector for accumulating diagnostics during a processing phase.
//!
//! The [`DiagnosticCollector`] allows phases to report every problem they
//! find instead of stopping at the first one.

use crate::diagnostic::Diagnostic;

/// A collector for accumulating diagnostics during a processing phase.
///
/// # Example
///
/// ```
/// # use protomap_core::diagnostic::{Diagnostic, DiagnosticCollector, ErrorCode, Location};
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning("type `Foo` is not declared in any enclosing scope")
///         .with_code(ErrorCode::E200)
///         .with_location(Location::field("Bar", "foo")),
/// );
///
/// assert!(!collector.has_errors());
/// assert_eq!(collector.into_diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic of another collection.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Returns `true` if any emitted diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Borrow the diagnostics emitted so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
