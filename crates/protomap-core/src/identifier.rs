//! Qualified identifiers for record types.
//!
//! This module provides the [`QualifiedId`] type: the path of local names
//! from the schema root down to a record type. Qualified ids are used as
//! diagram node identifiers, so two record types with the same local name in
//! different scopes never collide.

use std::{borrow::Borrow, fmt};

/// Separator placed between path segments of a [`QualifiedId`].
///
/// Protobuf names cannot contain a dot, so joining segments with it keeps
/// distinct paths distinct.
pub const SEPARATOR: char = '.';

/// The full nested path of a record type.
///
/// # Examples
///
/// ```
/// use protomap_core::identifier::QualifiedId;
///
/// let outer = QualifiedId::root("Outer");
/// let inner = outer.nested("Inner");
///
/// assert_eq!(inner, "Outer.Inner");
/// assert_eq!(inner.local_name(), "Inner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedId(String);

impl QualifiedId {
    /// Creates the id of a top-level record type.
    pub fn root(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Creates the id of a record type declared inside `self`.
    pub fn nested(&self, name: &str) -> Self {
        Self(format!("{}{SEPARATOR}{name}", self.0))
    }

    /// The last path segment.
    pub fn local_name(&self) -> &str {
        self.segments().next_back().unwrap_or_default()
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for QualifiedId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QualifiedId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for QualifiedId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QualifiedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
