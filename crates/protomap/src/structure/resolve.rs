//! Resolution of unqualified type references against the scope tree.
//!
//! A message field names the record type it references by its local name
//! only. [`lookup`] finds the declaring node by walking outward from the
//! referencing record type:
//!
//! 1. the record types declared directly inside the current scope,
//! 2. the enclosing record type itself, if its name matches,
//! 3. then the same two checks one level further out, until the root's
//!    top-level declarations have been searched.
//!
//! Only the enclosing record type's own name is compared at step 2; its
//! other children are searched once the walk has moved up to it.

use log::{debug, info};

use protomap_core::{
    diagnostic::{Diagnostic, ErrorCode, Location},
    identifier::QualifiedId,
};

use crate::{
    graph::Edge,
    structure::{Scope, ScopeIndex, ScopeTree},
};

/// Why a reference could not be bound to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedCause {
    /// No record type with that name exists in the scope chain.
    Missing,
    /// The referenced record type was removed by the exclusion filter; the
    /// referencing row is dropped rather than reported.
    Excluded,
}

/// A pending link that [`resolve`] could not bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    record: QualifiedId,
    field: String,
    target: String,
    cause: UnresolvedCause,
}

impl UnresolvedReference {
    /// The referencing record type.
    pub fn record(&self) -> &QualifiedId {
        &self.record
    }

    /// The referencing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The unqualified name that could not be found.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn cause(&self) -> UnresolvedCause {
        self.cause
    }

    /// Describe this reference as a warning diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::warning(format!(
            "type `{}` referenced by field `{}` of `{}` is not declared in any enclosing scope",
            self.target, self.field, self.record
        ))
        .with_code(ErrorCode::E200)
        .with_location(Location::field(self.record.as_str(), self.field.as_str()))
        .with_help("the field is shown without an edge; include the file declaring the type")
    }
}

/// The outcome of resolving every pending link of a scope tree.
#[derive(Debug, Default)]
pub struct Resolution {
    edges: Vec<Edge>,
    unresolved: Vec<UnresolvedReference>,
}

impl Resolution {
    /// Resolved edges, ordered by referencing node then field declaration.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// References that could not be resolved, in the same order.
    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    /// Split into edges and unresolved references.
    pub fn into_parts(self) -> (Vec<Edge>, Vec<UnresolvedReference>) {
        (self.edges, self.unresolved)
    }
}

/// Resolve every pending link of `tree`.
///
/// Resolution never stops early: each unresolved reference is recorded and
/// the remaining links are still processed.
pub fn resolve(tree: &ScopeTree<'_>) -> Resolution {
    info!(nodes = tree.len(); "Resolving references");

    let mut resolution = Resolution::default();
    for (index, node) in tree.nodes() {
        for (&field, &target) in node.pending_links() {
            match lookup(tree, index, target) {
                Some(found) => {
                    let edge = Edge::new(node.id().clone(), field, tree.node(found).id().clone());
                    debug!(edge:%; "Resolved reference");
                    resolution.edges.push(edge);
                }
                None => {
                    let cause = if tree.is_excluded_name(target) {
                        UnresolvedCause::Excluded
                    } else {
                        UnresolvedCause::Missing
                    };
                    debug!(
                        record = node.id().as_str(),
                        field,
                        target_type = target,
                        cause:?;
                        "Reference not resolved"
                    );
                    resolution.unresolved.push(UnresolvedReference {
                        record: node.id().clone(),
                        field: field.to_string(),
                        target: target.to_string(),
                        cause,
                    });
                }
            }
        }
    }

    debug!(
        edges = resolution.edges.len(),
        unresolved = resolution.unresolved.len();
        "References resolved"
    );
    resolution
}

/// Find the node a reference from `from` to the local name `target` binds to.
pub fn lookup(tree: &ScopeTree<'_>, from: ScopeIndex, target: &str) -> Option<ScopeIndex> {
    let mut scope = Scope::Node(from);
    loop {
        if let Some(&found) = tree.children_of(scope).get(target) {
            return Some(found);
        }

        let Scope::Node(current) = scope else {
            return None;
        };
        let parent = tree.node(current).parent();
        if let Some(parent) = parent {
            if tree.node(parent).name() == target {
                return Some(parent);
            }
        }

        scope = parent.map_or(Scope::Root, Scope::Node);
    }
}
