//! Structural comparison of syntax subtrees.
//!
//! Both equality relations exposed by the crate walk the same way: node kinds
//! must agree, leaves must agree on their text, constant literals must agree
//! on their value, and children are compared pairwise in order with trivia
//! skipped. Strict comparison also checks source positions. Loose comparison
//! instead forgives spellings that denote the same syntax: redundant
//! parentheses, trailing commas, an empty base-class list, and a bare tuple
//! versus a parenthesised one.

use tree_sitter::Node;

use crate::literal::Literal;
use crate::syntax::{kind, node_text, significant_children, unparenthesized};

/// Whether source positions participate in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Positions {
    /// Shape only; incidental layout differences are ignored.
    Ignore,
    /// Shape plus the start and end point of every positioned node.
    Compare,
}

/// One side of a comparison: a node and the source it was parsed from.
#[derive(Clone, Copy)]
pub(crate) struct Side<'a> {
    pub(crate) node: Node<'a>,
    pub(crate) source: &'a str,
}

impl<'a> Side<'a> {
    pub(crate) const fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    const fn with_node(self, node: Node<'a>) -> Self {
        Self {
            node,
            source: self.source,
        }
    }

    fn text(self) -> &'a str {
        node_text(self.node, self.source)
    }
}

/// Returns true when the two subtrees are structurally equal.
pub(crate) fn subtrees_equal(left: Side<'_>, right: Side<'_>, positions: Positions) -> bool {
    let (left_side, right_side) = match positions {
        // Redundant parentheses are layout, not structure.
        Positions::Ignore => (
            left.with_node(unparenthesized(left.node)),
            right.with_node(unparenthesized(right.node)),
        ),
        Positions::Compare => (left, right),
    };

    if positions == Positions::Compare && !same_position(left_side.node, right_side.node) {
        return false;
    }

    if Literal::is_literal_kind(left_side.node.kind())
        && Literal::is_literal_kind(right_side.node.kind())
    {
        let left_value = Literal::from_node(left_side.node, left_side.source);
        let right_value = Literal::from_node(right_side.node, right_side.source);
        if let (Some(a), Some(b)) = (left_value, right_value) {
            return a == b;
        }
    }

    if comparable_kind(left_side.node, positions) != comparable_kind(right_side.node, positions) {
        return false;
    }

    let left_children = comparable_children(left_side.node, positions);
    let right_children = comparable_children(right_side.node, positions);
    if left_children.is_empty() && right_children.is_empty() {
        return left_side.text() == right_side.text();
    }

    sequences_equal(
        &left_children,
        left_side.source,
        &right_children,
        right_side.source,
        positions,
    )
}

/// Compares two ordered node lists pairwise.
pub(crate) fn sequences_equal(
    left: &[Node<'_>],
    left_source: &str,
    right: &[Node<'_>],
    right_source: &str,
    positions: Positions,
) -> bool {
    left.len() == right.len()
        && left.iter().zip(right.iter()).all(|(l, r)| {
            subtrees_equal(
                Side::new(*l, left_source),
                Side::new(*r, right_source),
                positions,
            )
        })
}

/// The kind a node is compared under. Loosely, `(a, b)` and `a, b` are the
/// same tuple, both as expressions and as assignment targets.
fn comparable_kind(node: Node<'_>, positions: Positions) -> &'static str {
    match (positions, node.kind()) {
        (Positions::Ignore, kind::TUPLE) => kind::EXPRESSION_LIST,
        (Positions::Ignore, kind::TUPLE_PATTERN) => kind::PATTERN_LIST,
        (_, other) => other,
    }
}

/// The children that take part in a comparison.
///
/// Loosely, separator commas carry no structure except inside a subscript,
/// where `a[1,]` indexes with a tuple. A tuple's own parentheses and a class
/// header's empty `()` are dropped too.
fn comparable_children(node: Node<'_>, positions: Positions) -> Vec<Node<'_>> {
    let children = significant_children(node);
    if positions == Positions::Compare {
        return children;
    }

    let parent = node.kind();
    children
        .into_iter()
        .filter(|child| match child.kind() {
            "," => parent == kind::SUBSCRIPT,
            "(" | ")" => !matches!(parent, kind::TUPLE | kind::TUPLE_PATTERN),
            kind::ARGUMENT_LIST => {
                parent != kind::CLASS_DEFINITION || child.named_child_count() > 0
            }
            _ => true,
        })
        .collect()
}

/// Modules and blocks are statement containers with no position of their
/// own; trailing blank lines must not make otherwise equal trees differ.
fn same_position(left: Node<'_>, right: Node<'_>) -> bool {
    let positioned = |node: Node<'_>| !matches!(node.kind(), kind::MODULE | kind::BLOCK);
    if !positioned(left) || !positioned(right) {
        return true;
    }
    left.start_position() == right.start_position() && left.end_position() == right.end_position()
}
