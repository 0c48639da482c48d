//! Protobuf descriptor ingestion for protomap.
//!
//! This crate turns the output of `protoc --descriptor_set_out` (a serialized
//! [`FileDescriptorSet`]) into [`protomap_core::schema::Schema`] values, one
//! per file in the set.
//!
//! # Pipeline Position
//!
//! ```text
//! .proto source
//!     ↓ protoc (external)
//! FileDescriptorSet bytes
//!     ↓ decode + convert (this crate)
//! Schema
//!     ↓ protomap engine
//! DOT text
//! ```
//!
//! Referenced record types keep only their unqualified name; resolving them
//! against nested scopes is the engine's job. Enumeration fields carry their
//! values inline.
//!
//! # Example
//!
//! ```
//! use protomap_descriptor::{FileDescriptorSet, schemas_from_descriptor_set};
//!
//! let set = FileDescriptorSet::default();
//! assert!(schemas_from_descriptor_set(&set).is_empty());
//! ```

mod convert;
mod error;

pub use error::DescriptorError;
pub use prost_types::FileDescriptorSet;

use std::{fs, path::Path};

use log::{debug, info};
use prost::Message;

use protomap_core::{diagnostic::Diagnostic, schema::Schema};

/// One ingested schema file with the diagnostics raised while converting it.
#[derive(Debug, Clone)]
pub struct Ingested {
    schema: Schema,
    diagnostics: Vec<Diagnostic>,
}

impl Ingested {
    /// The converted schema. Record types with malformed fields are absent.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Diagnostics raised while converting, in declaration order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Split into the schema and its diagnostics.
    pub fn into_parts(self) -> (Schema, Vec<Diagnostic>) {
        (self.schema, self.diagnostics)
    }
}

/// Decode a serialized [`FileDescriptorSet`].
///
/// # Errors
///
/// Returns [`DescriptorError::Decode`] if the bytes are not a valid
/// descriptor set.
pub fn decode_descriptor_set(bytes: &[u8]) -> Result<FileDescriptorSet, DescriptorError> {
    let set = FileDescriptorSet::decode(bytes)?;
    debug!(files = set.file.len(); "Decoded descriptor set");
    Ok(set)
}

/// Read and decode a descriptor set file.
///
/// # Errors
///
/// Returns [`DescriptorError::Io`] if the file cannot be read and
/// [`DescriptorError::Decode`] if its content is not a descriptor set.
pub fn read_descriptor_set(path: impl AsRef<Path>) -> Result<FileDescriptorSet, DescriptorError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_descriptor_set(&bytes)
}

/// Convert every file of a descriptor set into its own [`Schema`].
///
/// Enumeration types are looked up across the whole set, so a field may use
/// an enum declared in an imported file when the set includes it.
pub fn schemas_from_descriptor_set(set: &FileDescriptorSet) -> Vec<Ingested> {
    let enums = convert::EnumIndex::new(set);

    set.file
        .iter()
        .map(|file| {
            info!(file = file.name(); "Converting descriptor");
            let (schema, diagnostics) = convert::convert_file(file, &enums);
            Ingested {
                schema,
                diagnostics,
            }
        })
        .collect()
}
