//! The graph model handed to the renderers.
//!
//! A [`GraphModel`] is the only output of the mapping stages: the retained
//! record types as [`NodeBody`]s (keyed by qualified id, in declaration
//! order), the resolved [`Edge`]s, and the diagnostics raised on the way.
//! It owns all of its data, so it outlives the schema and scope tree it was
//! built from.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};

use protomap_core::{diagnostic::Diagnostic, identifier::QualifiedId, schema::Field};

use crate::{
    export::dot::node_id,
    layout::AnchorSide,
    structure::{Resolution, ScopeTree, UnresolvedCause},
};

/// A resolved reference from a field row to a record type node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: QualifiedId,
    field: String,
    target: QualifiedId,
}

impl Edge {
    /// Create an edge from the row of `field` in `source` to `target`.
    pub fn new(source: QualifiedId, field: impl Into<String>, target: QualifiedId) -> Self {
        Self {
            source,
            field: field.into(),
            target,
        }
    }

    pub fn source(&self) -> &QualifiedId {
        &self.source
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn target(&self) -> &QualifiedId {
        &self.target
    }

    /// Name of the row port the edge starts from.
    pub fn port(&self) -> String {
        port_name(&self.field)
    }
}

impl fmt::Display for Edge {
    /// Formats the edge as a DOT edge statement.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}",
            node_id(self.source.as_str()),
            self.port(),
            node_id(self.target.as_str())
        )
    }
}

/// Port name of the row showing `field`.
pub fn port_name(field: &str) -> String {
    format!("l_{field}")
}

/// One rendered field row with its anchor placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    field: Field,
    anchor: AnchorSide,
}

impl Row {
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The side of the row that carries the edge port.
    pub fn anchor(&self) -> AnchorSide {
        self.anchor
    }
}

/// A retained record type with its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBody {
    id: QualifiedId,
    rows: Vec<Row>,
}

impl NodeBody {
    pub fn id(&self) -> &QualifiedId {
        &self.id
    }

    /// The label shown in the node's header row.
    pub fn label(&self) -> &str {
        self.id.as_str()
    }

    /// Rows in field declaration order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Set the anchor side of every row, in row order.
    ///
    /// Rows beyond the end of `sides` keep their current anchor.
    pub fn set_anchors(&mut self, sides: impl IntoIterator<Item = AnchorSide>) {
        for (row, side) in self.rows.iter_mut().zip(sides) {
            row.anchor = side;
        }
    }
}

/// The complete, renderable model of one schema.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    name: String,
    nodes: IndexMap<QualifiedId, NodeBody>,
    edges: Vec<Edge>,
    diagnostics: Vec<Diagnostic>,
}

impl GraphModel {
    /// Assemble the model from a scope tree and its resolution.
    ///
    /// Rows whose reference points at an excluded record type are dropped;
    /// rows whose reference is missing are kept and reported. Every row
    /// starts anchored on the left until the layout planner runs.
    pub fn assemble(name: impl Into<String>, tree: &ScopeTree<'_>, resolution: Resolution) -> Self {
        let (edges, unresolved) = resolution.into_parts();

        let mut diagnostics = Vec::new();
        let mut dropped = Vec::new();
        for reference in &unresolved {
            match reference.cause() {
                UnresolvedCause::Missing => diagnostics.push(reference.to_diagnostic()),
                UnresolvedCause::Excluded => dropped.push((reference.record(), reference.field())),
            }
        }

        let nodes = tree
            .nodes()
            .map(|(_, node)| {
                let rows = node
                    .rows()
                    .iter()
                    .filter(|field| !dropped.contains(&(node.id(), field.name())))
                    .map(|&field| Row {
                        field: field.clone(),
                        anchor: AnchorSide::Left,
                    })
                    .collect();
                let body = NodeBody {
                    id: node.id().clone(),
                    rows,
                };
                trace!(node = body.label(), rows = body.rows.len(); "Assembled node");
                (node.id().clone(), body)
            })
            .collect();

        let model = Self {
            name: name.into(),
            nodes,
            edges,
            diagnostics,
        };
        debug!(
            nodes = model.nodes.len(),
            edges = model.edges.len(),
            diagnostics = model.diagnostics.len();
            "Graph model assembled"
        );
        model
    }

    /// The schema name this model was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node bodies in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeBody> {
        self.nodes.values()
    }

    /// Mutable node bodies in declaration order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut NodeBody> {
        self.nodes.values_mut()
    }

    /// Look up a node by qualified id.
    pub fn node(&self, id: &str) -> Option<&NodeBody> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Non-fatal diagnostics raised while building the model.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Add diagnostics raised outside the engine, such as during ingestion.
    pub fn extend_diagnostics(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }
}
