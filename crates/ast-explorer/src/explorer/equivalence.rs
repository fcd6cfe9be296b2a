//! Position-insensitive comparison against source snippets.

use tracing::debug;

use crate::error::ExplorerError;
use crate::parser::ParsedModule;
use crate::structural::{Positions, Side, sequences_equal, subtrees_equal};
use crate::syntax::{bare_expression, kind, statement_list};

use super::{AstExplorer, Located};

const EQUIVALENCE_TARGET: &str = "ast_explorer::equivalence";

impl AstExplorer<'_> {
    /// Returns true when `snippet` has the same structure as the wrapped
    /// node, ignoring layout.
    ///
    /// The snippet is parsed on its own under the configuration of the
    /// handle's module, except that syntax errors in the snippet are always
    /// rejected, even when the module itself was parsed tolerantly. Modules and blocks are compared statement by
    /// statement with the whole snippet. Any other node is compared with
    /// the snippet's single statement, or with the expression that
    /// statement consists of, so a condition handle is equivalent to
    /// `"y == 2"`.
    ///
    /// An absent handle is never equivalent to anything, and the snippet is
    /// not parsed in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::ParseError`] when the snippet cannot be
    /// parsed.
    pub fn is_equivalent(&self, snippet: &str) -> Result<bool, ExplorerError> {
        let Some(located) = self.located() else {
            return Ok(false);
        };

        let config = located
            .module()
            .config()
            .clone()
            .with_reject_syntax_errors(true);
        let parsed = ParsedModule::parse_with(snippet, config)?;
        let equivalent = matches_snippet(located, &parsed);

        debug!(
            target: EQUIVALENCE_TARGET,
            kind = located.node().kind(),
            snippet_bytes = snippet.len(),
            equivalent,
            "compared node against snippet"
        );
        Ok(equivalent)
    }
}

fn matches_snippet(located: &Located<'_>, snippet: &ParsedModule) -> bool {
    let snippet_source = snippet.source();
    let Some(snippet_statements) = statement_list(snippet.root_node()) else {
        return false;
    };

    let node = located.node();
    if matches!(node.kind(), kind::MODULE | kind::BLOCK) {
        let own_statements = statement_list(node).unwrap_or_default();
        return sequences_equal(
            &own_statements,
            located.module().source(),
            &snippet_statements,
            snippet_source,
            Positions::Ignore,
        );
    }

    let [statement] = snippet_statements.as_slice() else {
        return false;
    };
    let own = located.side();
    subtrees_equal(own, Side::new(*statement, snippet_source), Positions::Ignore)
        || bare_expression(*statement).is_some_and(|expression| {
            subtrees_equal(own, Side::new(expression, snippet_source), Positions::Ignore)
        })
}
