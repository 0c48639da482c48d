//! Command-line argument definitions for the protomap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input schemas and how they are
//! compiled, override configuration values, and control logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the protomap schema mapper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input `.proto` files, or descriptor set files with `--descriptor-set`
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Protocol buffer compiler
    #[arg(long, default_value = "protoc")]
    pub protoc: String,

    /// Directory in which to search for imports (passed to the compiler)
    #[arg(short = 'I', long = "proto-path", value_name = "DIR")]
    pub proto_paths: Vec<PathBuf>,

    /// Treat inputs as precompiled `FileDescriptorSet` files
    #[arg(long)]
    pub descriptor_set: bool,

    /// Exclude record types and fields whose name matches this regex
    #[arg(short = 'x', long = "exclude", value_name = "REGEX")]
    pub excludes: Vec<String>,

    /// Font family
    #[arg(short, long)]
    pub font: Option<String>,

    /// Font size in points
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Arrowhead style of the edges
    #[arg(long)]
    pub arrow_style: Option<String>,

    /// Also generate a Doxygen page
    #[arg(long)]
    pub doxygen: bool,

    /// Title of the generated Doxygen page
    #[arg(long)]
    pub doxygen_title: Option<String>,

    /// Also write a tab-separated edge listing
    #[arg(long)]
    pub edge_list: bool,

    /// Additional output format (passed to dot as -T<FORMAT>)
    #[arg(short = 'T', value_name = "FORMAT")]
    pub formats: Vec<String>,

    /// Graphviz directed graph generator
    #[arg(long, default_value = "dot")]
    pub dot: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print debug info and keep the compiler's temporary directory
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["protomap", "a.proto"]);

        assert_eq!(args.inputs, [PathBuf::from("a.proto")]);
        assert_eq!(args.output, PathBuf::from("."));
        assert_eq!(args.protoc, "protoc");
        assert_eq!(args.dot, "dot");
        assert_eq!(args.log_level, "info");
        assert!(args.excludes.is_empty());
        assert!(!args.doxygen);
    }

    #[test]
    fn test_repeated_options() {
        let args = Args::parse_from([
            "protomap", "-x", "debug", "--exclude", "^Internal", "-T", "png", "-Tsvg", "-I",
            "protos", "a.proto", "b.proto",
        ]);

        assert_eq!(args.excludes, ["debug", "^Internal"]);
        assert_eq!(args.formats, ["png", "svg"]);
        assert_eq!(args.proto_paths, [PathBuf::from("protos")]);
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["protomap"]).is_err());
    }
}
