//! Error types for descriptor ingestion.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that prevent a descriptor set from being read at all.
///
/// Problems inside a readable descriptor set are reported as
/// [`protomap_core::diagnostic::Diagnostic`]s instead.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor set {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to decode descriptor set: {0}")]
    Decode(#[from] prost::DecodeError),
}
