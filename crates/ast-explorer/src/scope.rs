//! Scope-bounded and scope-crossing traversal over statement lists.
//!
//! Variable bindings are only visible in the statement list of the scope
//! that owns them, so variable lookup walks [`Reach::Local`]. Definitions are
//! located wherever they are nested, so function and class lookup walks
//! [`Reach::Nested`]. Neither strategy visits the scope node itself.

use std::ops::ControlFlow;

use tracing::warn;
use tree_sitter::Node;

use crate::syntax::{kind, significant_named_children, statement_list};

pub(crate) const SEARCH_TARGET: &str = "ast_explorer::search";

/// How far a traversal may reach from its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reach {
    /// Direct statements of the scope only.
    Local,
    /// Every descendant of the scope, in document order.
    Nested {
        /// Deepest tree level, relative to the scope, that is visited.
        max_depth: usize,
    },
}

/// Visits the nodes reachable from `scope` in document order (pre-order),
/// stopping early when `visit` breaks.
///
/// Returns `None` when a [`Reach::Local`] walk is asked of a scope with no
/// statement list.
pub(crate) fn walk_scope<'t, B>(
    scope: Node<'t>,
    reach: Reach,
    visit: &mut impl FnMut(Node<'t>) -> ControlFlow<B>,
) -> Option<ControlFlow<B>> {
    let flow = match reach {
        Reach::Local => statement_list(scope)?
            .into_iter()
            .try_for_each(|statement| visit(statement)),
        Reach::Nested { max_depth } => nested_roots(scope)
            .into_iter()
            .try_for_each(|node| walk_nested(node, 1, max_depth, &mut *visit)),
    };
    Some(flow)
}

/// The first level of a scope-crossing walk.
///
/// Modules and blocks start from their statements. Any other node starts
/// from all of its significant children, with a directly owned block opened
/// up into its statements, so `elif`, `else`, `except` and `finally`
/// clauses of a compound statement are searched as well as its first suite.
fn nested_roots(scope: Node<'_>) -> Vec<Node<'_>> {
    match scope.kind() {
        kind::MODULE | kind::BLOCK => significant_named_children(scope),
        kind::DECORATED_DEFINITION => scope
            .child_by_field_name("definition")
            .map(nested_roots)
            .unwrap_or_default(),
        _ => significant_named_children(scope)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == kind::BLOCK {
                    significant_named_children(child)
                } else {
                    vec![child]
                }
            })
            .collect(),
    }
}

fn walk_nested<'t, B>(
    node: Node<'t>,
    depth: usize,
    max_depth: usize,
    visit: &mut impl FnMut(Node<'t>) -> ControlFlow<B>,
) -> ControlFlow<B> {
    visit(node)?;

    if depth >= max_depth {
        if node.named_child_count() == 0 {
            return ControlFlow::Continue(());
        }
        warn!(
            target: SEARCH_TARGET,
            kind = node.kind(),
            line = node.start_position().row + 1,
            max_depth,
            "search depth limit reached; skipping nested subtree"
        );
        return ControlFlow::Continue(());
    }

    significant_named_children(node)
        .into_iter()
        .try_for_each(|child| walk_nested(child, depth + 1, max_depth, &mut *visit))
}

/// Returns the first node reachable from `scope` accepted by `matches`.
pub(crate) fn find_first<'t>(
    scope: Node<'t>,
    reach: Reach,
    mut matches: impl FnMut(Node<'t>) -> bool,
) -> Option<Node<'t>> {
    let flow = walk_scope(scope, reach, &mut |node| {
        if matches(node) {
            ControlFlow::Break(node)
        } else {
            ControlFlow::Continue(())
        }
    })?;
    match flow {
        ControlFlow::Break(found) => Some(found),
        ControlFlow::Continue(()) => None,
    }
}

/// Returns the last node reachable from `scope` accepted by `matches`.
pub(crate) fn find_last<'t>(
    scope: Node<'t>,
    reach: Reach,
    mut matches: impl FnMut(Node<'t>) -> bool,
) -> Option<Node<'t>> {
    let mut last = None;
    let _: ControlFlow<()> = walk_scope(scope, reach, &mut |node| {
        if matches(node) {
            last = Some(node);
        }
        ControlFlow::Continue(())
    })?;
    last
}

/// Returns every node reachable from `scope` accepted by `matches`.
pub(crate) fn find_all<'t>(
    scope: Node<'t>,
    reach: Reach,
    mut matches: impl FnMut(Node<'t>) -> bool,
) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    let _: Option<ControlFlow<()>> = walk_scope(scope, reach, &mut |node| {
        if matches(node) {
            found.push(node);
        }
        ControlFlow::Continue(())
    });
    found
}
