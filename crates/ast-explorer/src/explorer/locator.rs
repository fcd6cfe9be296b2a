//! Function, class and variable lookup.
//!
//! Definitions are found by a scope-crossing search: a helper nested inside
//! another function, a class body or an `if` block is still found from the
//! module handle. Variable bindings are scope-bounded: only the direct
//! statements of the handle's own scope are searched.

use tracing::trace;
use tree_sitter::Node;

use crate::literal::Literal;
use crate::scope::{Reach, SEARCH_TARGET, find_first, find_last};
use crate::syntax::{
    assigned_value, assignment_of, bare_expression, binds_name, calls_function, definition_name,
    kind, node_text, undecorated, unparenthesized,
};

use super::AstExplorer;

impl<'t> AstExplorer<'t> {
    /// Finds the first function named `name` anywhere below this handle.
    ///
    /// Decorated functions are returned together with their decorators.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Self {
        self.find_definition(kind::FUNCTION_DEFINITION, name)
    }

    /// Finds the first class named `name` anywhere below this handle.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Self {
        self.find_definition(kind::CLASS_DEFINITION, name)
    }

    /// Returns true when [`AstExplorer::find_function`] finds a match.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.find_function(name).is_present()
    }

    /// Returns true when [`AstExplorer::find_class`] finds a match.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.find_class(name).is_present()
    }

    /// Finds the last assignment statement binding `name` among the direct
    /// statements of this handle's scope.
    ///
    /// Bindings inside nested functions, classes or compound statements are
    /// not visible, and neither are bindings in enclosing scopes.
    #[must_use]
    pub fn find_variable(&self, name: &str) -> Self {
        let Some(located) = self.located() else {
            return Self::Absent;
        };
        let source = located.module().source();

        let found = find_last(located.node(), Reach::Local, |statement| {
            assignment_of(statement).is_some_and(|assignment| binds_name(assignment, source, name))
        });

        trace!(
            target: SEARCH_TARGET,
            scope = located.node().kind(),
            symbol = name,
            found = found.is_some(),
            "variable lookup"
        );
        found.map_or(Self::Absent, |node| located.rewrap(node))
    }

    /// Returns true when [`AstExplorer::find_variable`] finds a match.
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.find_variable(name).is_present()
    }

    /// Returns the constant value assigned to `name`.
    ///
    /// `Some(Literal::None)` is the `None` literal. `None` means the variable
    /// was not found or its value is not a constant literal.
    ///
    /// Strings containing a `\N{...}` named escape are not decoded and also
    /// yield `None`.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Literal> {
        let variable = self.find_variable(name);
        let located = variable.located()?;
        let value = assigned_expression(located.node())?;
        Literal::from_node(value, located.module().source())
    }

    /// Returns true when this handle wraps an assignment of an integer
    /// literal.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.located().is_some_and(|located| {
            assigned_expression(located.node()).is_some_and(|value| {
                value.kind() == kind::INTEGER
                    && !node_text(value, located.module().source()).ends_with(['j', 'J'])
            })
        })
    }

    /// Returns true when this handle wraps an assignment whose value calls
    /// `name`, or a bare expression statement that calls `name`.
    #[must_use]
    pub fn value_is_call(&self, name: &str) -> bool {
        self.located().is_some_and(|located| {
            let node = located.node();
            assigned_expression(node)
                .or_else(|| bare_expression(node).map(unparenthesized))
                .is_some_and(|value| calls_function(value, located.module().source(), name))
        })
    }

    fn find_definition(&self, wanted: &'static str, name: &str) -> Self {
        let Some(located) = self.located() else {
            return Self::Absent;
        };
        let module = located.module();
        let source = module.source();
        let reach = Reach::Nested {
            max_depth: module.config().max_search_depth(),
        };

        let found = find_first(located.node(), reach, |node| {
            let definition = undecorated(node);
            definition.kind() == wanted && definition_name(definition, source) == Some(name)
        });

        trace!(
            target: SEARCH_TARGET,
            scope = located.node().kind(),
            definition = wanted,
            symbol = name,
            found = found.is_some(),
            "definition lookup"
        );
        found.map_or(Self::Absent, |node| located.rewrap(node))
    }
}

/// Returns the value expression of an assignment statement, without
/// redundant parentheses.
fn assigned_expression(node: Node<'_>) -> Option<Node<'_>> {
    assignment_of(node)
        .and_then(assigned_value)
        .map(unparenthesized)
}
