//! Decomposition of `if`/`elif`/`else` chains.
//!
//! A chain decomposes into two parallel lists. Conditions hold the `if` test,
//! then each `elif` test, then an absent handle when a final `else` exists.
//! Bodies hold the suite of each branch in the same order.

use tracing::trace;
use tree_sitter::Node;

use crate::scope::{Reach, SEARCH_TARGET, find_all};
use crate::syntax::kind;

use super::{AstExplorer, Explorers, Located};

/// One arm of a conditional chain.
struct Branch<'t> {
    condition: Option<Node<'t>>,
    body: Option<Node<'t>>,
}

impl<'t> AstExplorer<'t> {
    /// Returns the `if` statements among the direct statements of this
    /// handle, in document order.
    ///
    /// Nested blocks are not searched.
    #[must_use]
    pub fn find_ifs(&self) -> Explorers<'t> {
        let Some(located) = self.located() else {
            return Explorers::default();
        };
        find_all(located.node(), Reach::Local, |statement| {
            statement.kind() == kind::IF_STATEMENT
        })
        .into_iter()
        .map(|node| located.rewrap(node))
        .collect()
    }

    /// Returns the tests of the wrapped `if` chain.
    ///
    /// One entry per `if` and `elif` test, followed by an absent entry when
    /// the chain ends in `else`. Empty when the handle does not wrap an `if`
    /// statement.
    #[must_use]
    pub fn find_conditions(&self) -> Explorers<'t> {
        self.branches()
            .map(|(located, branches)| {
                branches
                    .iter()
                    .map(|branch| wrap(located, branch.condition))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the suites of the wrapped `if` chain, parallel to
    /// [`AstExplorer::find_conditions`].
    #[must_use]
    pub fn find_if_bodies(&self) -> Explorers<'t> {
        self.branches()
            .map(|(located, branches)| {
                branches
                    .iter()
                    .map(|branch| wrap(located, branch.body))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn branches(&self) -> Option<(&Located<'t>, Vec<Branch<'t>>)> {
        let located = self
            .located()
            .filter(|located| located.node().kind() == kind::IF_STATEMENT)?;
        let statement = located.node();

        let mut branches = vec![Branch {
            condition: statement.child_by_field_name("condition"),
            body: statement.child_by_field_name("consequence"),
        }];

        let mut cursor = statement.walk();
        for alternative in statement.children_by_field_name("alternative", &mut cursor) {
            match alternative.kind() {
                kind::ELIF_CLAUSE => branches.push(Branch {
                    condition: alternative.child_by_field_name("condition"),
                    body: alternative.child_by_field_name("consequence"),
                }),
                kind::ELSE_CLAUSE => branches.push(Branch {
                    condition: None,
                    body: alternative.child_by_field_name("body"),
                }),
                _ => {}
            }
        }

        trace!(
            target: SEARCH_TARGET,
            line = statement.start_position().row + 1,
            branches = branches.len(),
            "decomposed conditional chain"
        );
        Some((located, branches))
    }
}

fn wrap<'t>(located: &Located<'t>, node: Option<Node<'t>>) -> AstExplorer<'t> {
    node.map_or(AstExplorer::Absent, |inner| located.rewrap(inner))
}
