//! CLI logic for the protomap schema mapper.
//!
//! This module contains the core CLI logic: compiling or reading each input,
//! mapping every schema it contains, writing the outputs and handing them to
//! Graphviz.

pub mod error_adapter;

mod args;
mod compiler;
mod config;
mod graphviz;

pub use args::Args;

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use protomap::{
    MapBuilder, ProtomapError,
    diagnostic::{Diagnostic, ErrorCode, Severity},
    hook::EdgeListHook,
};
use protomap_descriptor::{
    DescriptorError, Ingested, read_descriptor_set, schemas_from_descriptor_set,
};

use compiler::Compiler;

/// Run the protomap CLI application
///
/// Every input is processed independently: a failing input is reported and
/// the remaining inputs are still processed.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ProtomapError` for:
/// - Configuration loading errors and invalid exclusion patterns, before any
///   input is processed
/// - [`ProtomapError::Batch`] with the failure of every input that failed
pub fn run(args: &Args) -> Result<(), ProtomapError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_overrides(&mut app_config, args);

    let mut builder = MapBuilder::new(app_config)?;
    if args.edge_list {
        builder = builder.with_hook(EdgeListHook);
    }

    fs::create_dir_all(&args.output)?;

    let compiler = Compiler::new(args.protoc.as_str(), args.proto_paths.clone())
        .with_keep_temp_dir(args.debug);

    let mut session = Session {
        builder: &builder,
        args,
        written: HashSet::new(),
    };

    let mut failures = Vec::new();
    for input in &args.inputs {
        info!(input = input.display().to_string(); "Processing schema file");
        if let Err(err) = session.process_input(&compiler, input) {
            error!(input = input.display().to_string(), err:%; "Schema file failed");
            failures.push((input.clone(), err));
        }
    }

    if failures.is_empty() {
        info!(inputs = args.inputs.len(); "All schema files processed");
        Ok(())
    } else {
        Err(ProtomapError::Batch(failures))
    }
}

/// State shared by every input of one run.
struct Session<'a> {
    builder: &'a MapBuilder,
    args: &'a Args,
    /// Output stems claimed so far; a stem is never written twice.
    written: HashSet<String>,
}

impl Session<'_> {
    fn process_input(&mut self, compiler: &Compiler, input: &Path) -> Result<(), ProtomapError> {
        let ingested = if self.args.descriptor_set {
            let set = read_descriptor_set(input).map_err(|err| ingest_error(input, &err))?;
            schemas_from_descriptor_set(&set)
        } else {
            // The compiled input comes after its imports; only the input is drawn.
            let set = compiler.compile(input)?;
            let mut ingested = schemas_from_descriptor_set(&set);
            ingested.split_off(ingested.len().saturating_sub(1))
        };

        // Every schema of the input is mapped even when an earlier one fails.
        let mut errors = Vec::new();
        let mut failures = Vec::new();
        for schema in ingested {
            let name = schema.schema().name().to_string();
            match self.map_schema(schema) {
                Ok(diagnostics) => errors.extend(diagnostics),
                Err(err) => {
                    error!(schema = name.as_str(), err:%; "Schema failed");
                    failures.push((PathBuf::from(name), err));
                }
            }
        }

        if !errors.is_empty() {
            failures.push((
                input.to_path_buf(),
                ProtomapError::new_schema_error(input.display().to_string(), errors),
            ));
        }

        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0).1),
            _ => Err(ProtomapError::Batch(failures)),
        }
    }

    /// Map one schema and write its outputs, returning its error diagnostics.
    fn map_schema(&mut self, ingested: Ingested) -> Result<Vec<Diagnostic>, ProtomapError> {
        let (schema, diagnostics) = ingested.into_parts();

        let base = output_base(schema.name());
        if !self.written.insert(base.clone()) {
            return Err(ProtomapError::new_schema_error(
                schema.name(),
                vec![
                    Diagnostic::error(format!(
                        "output name `{base}` was already written in this run"
                    ))
                    .with_code(ErrorCode::E102)
                    .with_help("process schema files with the same name in separate runs"),
                ],
            ));
        }

        let mut graph = self.builder.build(&schema);
        graph.extend_diagnostics(diagnostics);

        let outputs = self.builder.render_outputs(&graph)?;
        let mut dot_file = None;
        for (suffix, content) in outputs.files() {
            let path = self.args.output.join(format!("{base}{suffix}"));
            fs::write(&path, content)?;
            info!(path = path.display().to_string(); "Wrote output");
            if suffix == ".dot" {
                dot_file = Some(path);
            }
        }

        if let Some(dot_file) = dot_file {
            graphviz::render_formats(&self.args.dot, &dot_file, &self.args.formats)?;
        }

        let mut errors = Vec::new();
        for diagnostic in graph.diagnostics() {
            match diagnostic.severity() {
                Severity::Warning => warn!(schema = schema.name(); "{diagnostic}"),
                Severity::Error => errors.push(diagnostic.clone()),
            }
        }
        Ok(errors)
    }
}

/// Stem of every output file of a schema: its path with separators flattened.
///
/// Schema files with the same file name in different directories map to
/// different stems.
fn output_base(schema_name: &str) -> String {
    schema_name
        .trim_start_matches(|c: char| c == '/' || c == '\\')
        .replace(|c: char| c == '/' || c == '\\', "_")
}

pub(crate) fn ingest_error(input: &Path, err: &DescriptorError) -> ProtomapError {
    ProtomapError::new_schema_error(
        input.display().to_string(),
        vec![
            Diagnostic::error(err.to_string())
                .with_code(ErrorCode::E100)
                .with_help("check that the file is a serialized FileDescriptorSet"),
        ],
    )
}
