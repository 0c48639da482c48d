//! Anchor placement for field rows.
//!
//! Every rendered row has two outer cells: the tag-number cell on the left
//! and the name cell on the right. The edge port of a row sits on one of
//! them. Consecutive rows whose names only differ by a trailing number
//! (`choice_a1`, `choice_a2`) form a group and share a side; each new group
//! switches to the other side, spreading the edges of a node over both of
//! its flanks.

use std::fmt;

use log::trace;

use crate::graph::NodeBody;

/// The cell of a row that carries its edge port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorSide {
    /// The tag-number cell.
    #[default]
    Left,
    /// The name cell.
    Right,
}

impl AnchorSide {
    /// The opposite side.
    pub fn flip(self) -> Self {
        match self {
            AnchorSide::Left => AnchorSide::Right,
            AnchorSide::Right => AnchorSide::Left,
        }
    }
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorSide::Left => write!(f, "left"),
            AnchorSide::Right => write!(f, "right"),
        }
    }
}

/// A field name without its trailing run of decimal digits.
///
/// ```
/// use protomap::layout::base_name;
///
/// assert_eq!(base_name("choice_a12"), "choice_a");
/// assert_eq!(base_name("other"), "other");
/// ```
pub fn base_name(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Plan the anchor side of each name, in order.
///
/// The first row starts on the left; a row switches sides whenever its base
/// name differs from the previous row's.
pub fn plan<'n>(names: impl IntoIterator<Item = &'n str>) -> Vec<AnchorSide> {
    let mut side = AnchorSide::Left;
    let mut previous: Option<&str> = None;

    names
        .into_iter()
        .map(|name| {
            let base = base_name(name);
            if previous.is_some_and(|previous| previous != base) {
                side = side.flip();
            }
            previous = Some(base);
            side
        })
        .collect()
}

/// Plan the anchor side of every row of `node`, in row order.
pub fn layout(node: &NodeBody) -> Vec<AnchorSide> {
    let sides = plan(node.rows().iter().map(|row| row.field().name()));
    trace!(node = node.label(), sides:?; "Planned row anchors");
    sides
}

#[cfg(test)]
mod tests {
    use super::*;

    use AnchorSide::{Left, Right};

    #[test]
    fn test_base_name_strips_trailing_digits_only() {
        assert_eq!(base_name("choice_a1"), "choice_a");
        assert_eq!(base_name("v2_name"), "v2_name");
        assert_eq!(base_name("x100"), "x");
        assert_eq!(base_name("123"), "");
    }

    #[test]
    fn test_numbered_family_shares_a_side() {
        assert_eq!(
            plan(["choice_a1", "choice_a2", "other"]),
            [Left, Left, Right]
        );
    }

    #[test]
    fn test_unrelated_rows_alternate() {
        assert_eq!(plan(["id", "name", "email", "phone"]), [Left, Right, Left, Right]);
    }

    #[test]
    fn test_groups_alternate() {
        assert_eq!(
            plan(["a1", "a2", "b1", "b2", "b3", "c"]),
            [Left, Left, Right, Right, Right, Left]
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert!(plan([]).is_empty());
        assert_eq!(plan(["only"]), [Left]);
    }

    #[test]
    fn test_flip() {
        assert_eq!(Left.flip(), Right);
        assert_eq!(Right.flip(), Left);
    }
}
