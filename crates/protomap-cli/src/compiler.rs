//! Schema compilation through `protoc`.
//!
//! Each `.proto` input is compiled into a descriptor set inside its own
//! temporary directory, so concurrent or repeated runs never see each
//! other's files. The directory is removed when compilation finishes unless
//! it is explicitly kept for debugging.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use tempfile::TempDir;

use protomap::ProtomapError;
use protomap_descriptor::{FileDescriptorSet, read_descriptor_set};

const DESCRIPTOR_FILE: &str = "descriptor.pb";

/// Runs the protobuf compiler on single schema files.
#[derive(Debug, Clone)]
pub struct Compiler {
    protoc: String,
    proto_paths: Vec<PathBuf>,
    keep_temp_dir: bool,
}

impl Compiler {
    pub fn new(protoc: impl Into<String>, proto_paths: Vec<PathBuf>) -> Self {
        Self {
            protoc: protoc.into(),
            proto_paths,
            keep_temp_dir: false,
        }
    }

    /// Keep the temporary directory with the compiled descriptor set.
    pub fn with_keep_temp_dir(mut self, keep: bool) -> Self {
        self.keep_temp_dir = keep;
        self
    }

    /// Compile `input` together with its imports.
    ///
    /// Without configured proto paths, the directory of `input` is used as
    /// the only import root.
    ///
    /// # Errors
    ///
    /// Returns [`ProtomapError::Compiler`] if the compiler cannot be started
    /// or exits unsuccessfully, and [`ProtomapError::Schema`] if its output
    /// cannot be decoded.
    pub fn compile(&self, input: &Path) -> Result<FileDescriptorSet, ProtomapError> {
        let temp_dir = TempDir::with_prefix("protomap")?;
        let descriptor_path = temp_dir.path().join(DESCRIPTOR_FILE);

        let mut command = Command::new(&self.protoc);
        command
            .arg(format!("--descriptor_set_out={}", descriptor_path.display()))
            .arg("--include_imports");
        if self.proto_paths.is_empty() {
            let root = input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            command.arg(format!("-I{}", root.display()));
        } else {
            for proto_path in &self.proto_paths {
                command.arg(format!("-I{}", proto_path.display()));
            }
        }
        command.arg(input);

        debug!(command:?; "Executing protobuf compiler");
        let output = command.output().map_err(|err| {
            ProtomapError::Compiler(format!("failed to start `{}`: {err}", self.protoc))
        })?;

        if !output.status.success() {
            return Err(ProtomapError::Compiler(format!(
                "`{}` failed on {} ({}): {}",
                self.protoc,
                input.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let set = read_descriptor_set(&descriptor_path)
            .map_err(|err| crate::ingest_error(input, &err))?;

        if self.keep_temp_dir {
            let kept = temp_dir.keep();
            info!(path = kept.display().to_string(); "Kept compiler output directory");
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_compiler_is_reported() {
        let compiler = Compiler::new("protomap-no-such-compiler", Vec::new());

        let err = compiler.compile(Path::new("a.proto")).unwrap_err();

        match err {
            ProtomapError::Compiler(message) => {
                assert!(message.contains("protomap-no-such-compiler"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
