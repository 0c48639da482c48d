//! The scope tree of retained record types.
//!
//! Nodes live in an arena owned by [`ScopeTree`]. Parent links are plain
//! [`ScopeIndex`] values into that arena, so walking outward during name
//! lookup never needs shared ownership between a node and its children.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, info, trace};

use protomap_core::{
    identifier::QualifiedId,
    schema::{Field, RecordType, Schema},
};

use crate::filter::ExclusionFilter;

/// Index of a [`ScopeNode`] inside its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeIndex(usize);

/// A scope in which names are looked up: the implicit root or a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Node(ScopeIndex),
}

/// One retained record type.
#[derive(Debug)]
pub struct ScopeNode<'a> {
    id: QualifiedId,
    name: &'a str,
    parent: Option<ScopeIndex>,
    children: IndexMap<&'a str, ScopeIndex>,
    rows: Vec<&'a Field>,
    pending_links: IndexMap<&'a str, &'a str>,
}

impl<'a> ScopeNode<'a> {
    fn new(id: QualifiedId, name: &'a str, parent: Option<ScopeIndex>) -> Self {
        Self {
            id,
            name,
            parent,
            children: IndexMap::new(),
            rows: Vec::new(),
            pending_links: IndexMap::new(),
        }
    }

    /// The unique node identifier: the path of local names from the root.
    pub fn id(&self) -> &QualifiedId {
        &self.id
    }

    /// The local name of the record type.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The enclosing record type, or `None` for top-level record types.
    pub fn parent(&self) -> Option<ScopeIndex> {
        self.parent
    }

    /// Record types declared directly inside this one, keyed by local name.
    pub fn children(&self) -> &IndexMap<&'a str, ScopeIndex> {
        &self.children
    }

    /// Retained fields in declaration order.
    pub fn rows(&self) -> &[&'a Field] {
        &self.rows
    }

    /// Retained message fields mapped to the unqualified name of the record
    /// type they reference, in declaration order.
    pub fn pending_links(&self) -> &IndexMap<&'a str, &'a str> {
        &self.pending_links
    }
}

/// The scope tree of one schema.
#[derive(Debug, Default)]
pub struct ScopeTree<'a> {
    nodes: Vec<ScopeNode<'a>>,
    roots: IndexMap<&'a str, ScopeIndex>,
    excluded_names: HashSet<&'a str>,
}

impl<'a> ScopeTree<'a> {
    /// Build the scope tree of `schema`.
    ///
    /// Record types are visited depth-first in declaration order. A record
    /// type whose name is excluded by `filter` is skipped together with every
    /// type declared inside it. Within a retained record type, excluded
    /// fields and message fields referencing an excluded type name are
    /// dropped; the remaining fields become rows, and message fields also
    /// become pending links.
    pub fn build(schema: &'a Schema, filter: &ExclusionFilter) -> Self {
        info!(schema = schema.name(); "Building scope tree");

        let mut tree = Self::default();
        for record in schema.records() {
            tree.insert(record, None, filter);
        }

        debug!(
            nodes = tree.nodes.len(),
            excluded = tree.excluded_names.len();
            "Scope tree built"
        );
        trace!(tree:?; "Scope tree");
        tree
    }

    fn insert(
        &mut self,
        record: &'a RecordType,
        parent: Option<ScopeIndex>,
        filter: &ExclusionFilter,
    ) {
        if filter.is_excluded(record.name()) {
            info!(record = record.name(); "Excluding record type");
            self.mark_excluded(record);
            return;
        }

        let id = match parent {
            Some(parent) => self.nodes[parent.0].id.nested(record.name()),
            None => QualifiedId::root(record.name()),
        };
        let index = ScopeIndex(self.nodes.len());
        let mut node = ScopeNode::new(id, record.name(), parent);

        for field in record.fields() {
            if filter.is_excluded(field.name()) {
                debug!(record = node.id.as_str(), field = field.name(); "Excluding field");
                continue;
            }
            if let Some(target) = field.referenced_type() {
                if filter.is_excluded(target) {
                    debug!(
                        record = node.id.as_str(),
                        field = field.name(),
                        referenced = target;
                        "Dropping field referencing an excluded type"
                    );
                    continue;
                }
                node.pending_links.insert(field.name(), target);
            }
            node.rows.push(field);
        }

        trace!(record = node.id.as_str(), rows = node.rows.len(); "Added scope node");
        self.nodes.push(node);

        let siblings = match parent {
            Some(parent) => &mut self.nodes[parent.0].children,
            None => &mut self.roots,
        };
        siblings.insert(record.name(), index);

        for nested in record.nested() {
            self.insert(nested, Some(index), filter);
        }
    }

    fn mark_excluded(&mut self, record: &'a RecordType) {
        self.excluded_names.insert(record.name());
        for nested in record.nested() {
            self.mark_excluded(nested);
        }
    }

    /// Every node in depth-first declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (ScopeIndex, &ScopeNode<'a>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (ScopeIndex(index), node))
    }

    /// Borrow a node by index.
    pub fn node(&self, index: ScopeIndex) -> &ScopeNode<'a> {
        &self.nodes[index.0]
    }

    /// Number of retained record types.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no record type was retained.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The record types declared directly in `scope`, keyed by local name.
    pub fn children_of(&self, scope: Scope) -> &IndexMap<&'a str, ScopeIndex> {
        match scope {
            Scope::Root => &self.roots,
            Scope::Node(index) => &self.nodes[index.0].children,
        }
    }

    /// Find a node by its qualified id.
    pub fn find(&self, id: &str) -> Option<ScopeIndex> {
        self.nodes().find(|(_, node)| node.id == id).map(|(index, _)| index)
    }

    /// Returns `true` if a record type with this local name was removed by
    /// the exclusion filter, directly or as part of an excluded subtree.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.excluded_names.contains(name)
    }
}
