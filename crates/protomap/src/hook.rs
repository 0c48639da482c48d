//! Post-processing hooks.
//!
//! A hook receives the finished [`GraphModel`] and returns extra files to
//! write next to the DOT output, keyed by file name suffix. Hooks only see
//! the model through its public accessors and cannot change it.
//!
//! # Examples
//!
//! ```
//! use indexmap::IndexMap;
//! use protomap::{GraphModel, ProtomapError, hook::PostProcess};
//!
//! struct NodeCount;
//!
//! impl PostProcess for NodeCount {
//!     fn outputs(&self, graph: &GraphModel) -> Result<IndexMap<String, String>, ProtomapError> {
//!         let count = graph.nodes().count();
//!         Ok(IndexMap::from([(".count".to_string(), format!("{count}\n"))]))
//!     }
//! }
//! ```

use std::fmt::Write;

use indexmap::IndexMap;

use crate::{error::ProtomapError, graph::GraphModel};

/// A callback producing additional outputs from a finished graph model.
pub trait PostProcess {
    /// Files to write, keyed by suffix appended to the input file name.
    ///
    /// # Errors
    ///
    /// An error abandons the outputs of the current input file only.
    fn outputs(&self, graph: &GraphModel) -> Result<IndexMap<String, String>, ProtomapError>;
}

/// Writes every edge as a `source\tfield\ttarget` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeListHook;

impl EdgeListHook {
    pub const SUFFIX: &'static str = ".edges.tsv";
}

impl PostProcess for EdgeListHook {
    fn outputs(&self, graph: &GraphModel) -> Result<IndexMap<String, String>, ProtomapError> {
        let mut listing = String::new();
        for edge in graph.edges() {
            writeln!(listing, "{}\t{}\t{}", edge.source(), edge.field(), edge.target())
                .map_err(|err| ProtomapError::Render(err.to_string()))?;
        }
        Ok(IndexMap::from([(Self::SUFFIX.to_string(), listing)]))
    }
}

#[cfg(test)]
mod tests {
    use protomap_core::schema::{Field, Multiplicity, RecordType, Schema};

    use super::*;
    use crate::{
        filter::ExclusionFilter,
        structure::{ScopeTree, resolve},
    };

    #[test]
    fn test_edge_list() {
        let schema = Schema::new("test.proto")
            .with_record(RecordType::new("Address"))
            .with_record(
                RecordType::new("Person")
                    .with_field(Field::message("home", 1, Multiplicity::Optional, "Address"))
                    .with_nested(RecordType::new("Card").with_field(Field::message(
                        "owner",
                        1,
                        Multiplicity::Required,
                        "Person",
                    ))),
            );
        let tree = ScopeTree::build(&schema, &ExclusionFilter::none());
        let graph = GraphModel::assemble(schema.name(), &tree, resolve(&tree));

        let outputs = EdgeListHook.outputs(&graph).unwrap();

        assert_eq!(
            outputs[EdgeListHook::SUFFIX],
            "Person\thome\tAddress\nPerson.Card\towner\tPerson\n"
        );
    }

    #[test]
    fn test_empty_graph_gives_empty_listing() {
        let outputs = EdgeListHook.outputs(&GraphModel::default()).unwrap();
        assert_eq!(outputs.len(), 1);
        assert!(outputs[EdgeListHook::SUFFIX].is_empty());
    }
}
