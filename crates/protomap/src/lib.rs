//! Protomap - Render protobuf schemas as Graphviz diagrams.
//!
//! Turns a [`Schema`](schema::Schema) into a [`GraphModel`]: one node per
//! record type with its fields as table rows, one edge per field referencing
//! another record type. The model is then rendered as DOT text and,
//! optionally, as a Doxygen page embedding that text.
//!
//! The engine performs no I/O; compiling `.proto` files and running Graphviz
//! are left to the caller.

pub mod config;
pub mod export;
pub mod filter;
pub mod hook;
pub mod layout;
pub mod structure;

mod error;
mod graph;

pub use protomap_core::{diagnostic, identifier, schema};

pub use error::ProtomapError;
pub use graph::{Edge, GraphModel, NodeBody, Row, port_name};

use indexmap::IndexMap;
use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, dot::DotExporter, doxygen::DoxygenExporter};
use filter::ExclusionFilter;
use hook::PostProcess;
use schema::Schema;
use structure::ScopeTree;

/// Builder for mapping schemas and rendering the resulting graphs.
///
/// This provides an API for processing schemas through the filtering,
/// scoping, resolution, layout and rendering stages.
///
/// # Examples
///
/// ```rust
/// use protomap::{MapBuilder, config::AppConfig};
/// use protomap::schema::{Field, Multiplicity, RecordType, Schema};
///
/// let schema = Schema::new("person.proto")
///     .with_record(RecordType::new("Address"))
///     .with_record(
///         RecordType::new("Person")
///             .with_field(Field::message("home", 1, Multiplicity::Optional, "Address")),
///     );
///
/// let builder = MapBuilder::new(AppConfig::default())
///     .expect("Invalid configuration");
///
/// let graph = builder.build(&schema);
/// let dot = builder.render_dot(&graph);
///
/// assert!(dot.contains("Person:l_home -> Address"));
///
/// // Or use default config
/// let builder = MapBuilder::default();
/// ```
pub struct MapBuilder {
    config: AppConfig,
    filter: ExclusionFilter,
    hooks: Vec<Box<dyn PostProcess>>,
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            filter: ExclusionFilter::none(),
            hooks: Vec::new(),
        }
    }
}

impl MapBuilder {
    /// Create a new map builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including filter and style settings
    ///
    /// # Errors
    ///
    /// Returns [`ProtomapError::Pattern`] if an exclusion pattern is not a
    /// valid regular expression.
    pub fn new(config: AppConfig) -> Result<Self, ProtomapError> {
        let filter = ExclusionFilter::new(config.filter().exclude())?;
        Ok(Self {
            config,
            filter,
            hooks: Vec::new(),
        })
    }

    /// Register a post-processing hook, run by [`render_outputs`](Self::render_outputs).
    pub fn with_hook(mut self, hook: impl PostProcess + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Map a schema into a graph model.
    ///
    /// Unresolved references are carried as warnings on the returned model;
    /// mapping itself never fails.
    pub fn build(&self, schema: &Schema) -> GraphModel {
        info!(schema = schema.name(); "Mapping schema");

        let tree = ScopeTree::build(schema, &self.filter);
        let resolution = structure::resolve(&tree);
        let mut graph = GraphModel::assemble(schema.name(), &tree, resolution);

        for node in graph.nodes_mut() {
            let sides = layout::layout(node);
            node.set_anchors(sides);
        }

        debug!(
            nodes = graph.nodes().count(),
            edges = graph.edges().len();
            "Schema mapped"
        );
        trace!(graph:?; "Graph model");
        graph
    }

    /// Render a graph model as DOT text.
    pub fn render_dot(&self, graph: &GraphModel) -> String {
        DotExporter::new(self.config.style()).render(graph)
    }

    /// Render a graph model as a Doxygen page titled `title`.
    pub fn render_doxygen(&self, graph: &GraphModel, title: &str) -> String {
        DoxygenExporter::new(DotExporter::new(self.config.style()), title).render(graph)
    }

    /// Render every configured output of a graph model.
    ///
    /// Always includes the DOT text; the Doxygen page is included when
    /// enabled in the configuration, followed by the outputs of every
    /// registered hook in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`ProtomapError::Render`] if a hook fails, or produces a
    /// suffix that is empty, contains a path separator, or is already taken.
    pub fn render_outputs(&self, graph: &GraphModel) -> Result<RenderedOutputs, ProtomapError> {
        let dot = DotExporter::new(self.config.style());
        let mut exporters: Vec<Box<dyn Exporter + '_>> = vec![Box::new(dot.clone())];
        if self.config.doxygen().enabled() {
            exporters.push(Box::new(DoxygenExporter::new(
                dot,
                self.config.doxygen().title(),
            )));
        }

        let mut outputs = RenderedOutputs::default();
        for exporter in &exporters {
            outputs.insert(exporter.suffix().to_string(), exporter.export(graph)?)?;
        }

        for hook in &self.hooks {
            for (suffix, content) in hook.outputs(graph)? {
                debug!(suffix = suffix.as_str(); "Hook output");
                outputs.insert(suffix, content)?;
            }
        }

        Ok(outputs)
    }
}

/// Every text output of one graph model, keyed by file name suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedOutputs {
    files: IndexMap<String, String>,
}

impl RenderedOutputs {
    fn insert(&mut self, suffix: String, content: String) -> Result<(), ProtomapError> {
        if suffix.is_empty() || suffix.contains(|c: char| matches!(c, '/' | '\\')) {
            return Err(ProtomapError::Render(format!(
                "invalid output suffix `{suffix}`"
            )));
        }
        if self.files.contains_key(&suffix) {
            return Err(ProtomapError::Render(format!(
                "output suffix `{suffix}` produced twice"
            )));
        }
        self.files.insert(suffix, content);
        Ok(())
    }

    /// The DOT text.
    pub fn dot(&self) -> &str {
        self.get(".dot").unwrap_or_default()
    }

    /// The Doxygen page, if enabled.
    pub fn doxygen(&self) -> Option<&str> {
        self.get(".dox")
    }

    pub fn get(&self, suffix: &str) -> Option<&str> {
        self.files.get(suffix).map(String::as_str)
    }

    /// `(suffix, content)` pairs in production order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(suffix, content)| (suffix.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
