//! Scope structure of a schema.
//!
//! This module turns the nested record-type declarations of a
//! [`Schema`](protomap_core::schema::Schema) into a [`ScopeTree`] and resolves
//! the unqualified type names used by message fields against it.
//!
//! The module is organized into two stages:
//! - **Scope tree**: [`ScopeTree::build`] walks the declarations depth-first,
//!   applies the exclusion filter and assigns every retained record type its
//!   [`QualifiedId`](protomap_core::identifier::QualifiedId)
//! - **Resolution**: [`resolve`] binds every pending link to a node of the
//!   tree, producing [`Edge`](crate::graph::Edge)s and
//!   [`UnresolvedReference`]s
//!
//! The tree borrows from the schema it was built from and is discarded once
//! the graph model has been assembled.

mod resolve;
mod scope_tree;

pub use resolve::{Resolution, UnresolvedCause, UnresolvedReference, lookup, resolve};
pub use scope_tree::{Scope, ScopeIndex, ScopeNode, ScopeTree};
