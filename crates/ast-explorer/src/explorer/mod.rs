//! The chainable explorer handle.
//!
//! An [`AstExplorer`] wraps either one node of a [`ParsedModule`] or nothing
//! at all. Every query is total over both states: querying an absent handle
//! yields another absent handle, an empty [`Explorers`] list, `false`, or
//! `None`, so chains of any length never need intermediate presence checks.

mod conditional;
mod equivalence;
mod locator;
mod sequence;

use std::fmt;

use tree_sitter::Node;

use crate::error::ExplorerError;
use crate::parser::ParsedModule;
use crate::position::point_to_one_based;
use crate::structural::{Positions, Side, subtrees_equal};
use crate::syntax::{node_text, python_language, statement_list};

pub use sequence::Explorers;

/// A handle on a node of a parsed Python module, or on nothing.
///
/// The default (and [`AstExplorer::new`]) is the absent handle. Absent
/// handles are equal to each other and to nothing else.
///
/// `==` is strict: two present handles are equal when their subtrees have
/// the same shape *and* the same source positions. Use
/// [`AstExplorer::is_equivalent`] for position-insensitive comparison
/// against a snippet.
///
/// # Example
///
/// ```
/// use ast_explorer::ParsedModule;
///
/// let module = ParsedModule::parse("def foo():\n  x = 1\n")?;
/// let x = module.explorer().find_function("foo").find_variable("x");
/// assert!(x.is_integer());
/// assert!(x.is_equivalent("x = 1")?);
/// assert!(module.explorer().find_function("bar").find_variable("x").is_absent());
/// # Ok::<(), ast_explorer::ExplorerError>(())
/// ```
#[derive(Clone, Copy, Default)]
pub enum AstExplorer<'t> {
    /// No node: the result of a lookup that found nothing.
    #[default]
    Absent,
    /// A node of a parsed module.
    Present(Located<'t>),
}

/// A node together with the module that owns it.
#[derive(Clone, Copy)]
pub struct Located<'t> {
    node: Node<'t>,
    module: &'t ParsedModule,
}

impl<'t> Located<'t> {
    /// Returns the wrapped Tree-sitter node.
    #[must_use]
    pub const fn node(&self) -> Node<'t> {
        self.node
    }

    /// Returns the module the node belongs to.
    #[must_use]
    pub const fn module(&self) -> &'t ParsedModule {
        self.module
    }

    /// Returns the source text covered by the node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        node_text(self.node, self.module.source())
    }

    fn side(&self) -> Side<'t> {
        Side::new(self.node, self.module.source())
    }

    const fn rewrap(&self, node: Node<'t>) -> AstExplorer<'t> {
        AstExplorer::Present(Located {
            node,
            module: self.module,
        })
    }
}

impl fmt::Debug for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Located")
            .field("kind", &self.node.kind())
            .field("start", &self.node.start_position())
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Debug for AstExplorer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Present(located) => f.debug_tuple("Present").field(located).finish(),
        }
    }
}

impl<'t> AstExplorer<'t> {
    /// Creates an absent handle.
    #[must_use]
    pub const fn new() -> Self {
        Self::Absent
    }

    /// Wraps the root of `module`.
    pub(crate) fn root(module: &'t ParsedModule) -> Self {
        Self::Present(Located {
            node: module.root_node(),
            module,
        })
    }

    /// Wraps an arbitrary node of `module`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::InvalidInput`] when `node` was not produced
    /// by the Python grammar or does not belong to `module`'s tree.
    pub fn from_node(module: &'t ParsedModule, node: Node<'t>) -> Result<Self, ExplorerError> {
        if *node.language() != python_language() {
            return Err(ExplorerError::invalid_input(format!(
                "`{}` node is not a Python syntax node",
                node.kind()
            )));
        }

        let mut root = node;
        while let Some(parent) = root.parent() {
            root = parent;
        }
        if root.id() != module.root_node().id() {
            return Err(ExplorerError::invalid_input(format!(
                "`{}` node does not belong to this module",
                node.kind()
            )));
        }

        Ok(Self::Present(Located { node, module }))
    }

    /// Returns true when the handle wraps a node.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns true when the handle wraps nothing.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the module the wrapped node belongs to, if present.
    #[must_use]
    pub fn module(&self) -> Option<&'t ParsedModule> {
        self.located().map(Located::module)
    }

    /// Returns the wrapped node and its module, if present.
    #[must_use]
    pub const fn located(&self) -> Option<&Located<'t>> {
        match self {
            Self::Present(located) => Some(located),
            Self::Absent => None,
        }
    }

    /// Returns the wrapped Tree-sitter node, if present.
    #[must_use]
    pub fn node(&self) -> Option<Node<'t>> {
        self.located().map(Located::node)
    }

    /// Returns the grammar kind of the wrapped node, such as
    /// `"function_definition"`.
    #[must_use]
    pub fn kind(&self) -> Option<&'static str> {
        self.node().map(|node| node.kind())
    }

    /// Returns the source text of the wrapped node.
    #[must_use]
    pub fn text(&self) -> Option<&'t str> {
        self.located().map(Located::text)
    }

    /// Returns the one-based (line, column) where the wrapped node starts.
    #[must_use]
    pub fn start_position(&self) -> Option<(u32, u32)> {
        self.node().map(|node| point_to_one_based(node.start_position()))
    }

    /// Returns the direct statements of the wrapped node as handles.
    ///
    /// Empty when the handle is absent or the node owns no statement list.
    #[must_use]
    pub fn statements(&self) -> Explorers<'t> {
        let Some(located) = self.located() else {
            return Explorers::default();
        };
        statement_list(located.node)
            .unwrap_or_default()
            .into_iter()
            .map(|node| located.rewrap(node))
            .collect()
    }

    /// Returns the number of direct statements owned by the wrapped node.
    ///
    /// Zero when the handle is absent or the node owns no statement list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.node()
            .and_then(statement_list)
            .map_or(0, |statements| statements.len())
    }

    /// Returns true when [`AstExplorer::len`] is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a handle on the `index`-th direct statement.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::OutOfRange`] when `index` is not below
    /// [`AstExplorer::len`].
    pub fn get(&self, index: usize) -> Result<Self, ExplorerError> {
        self.statements().get(index)
    }
}

impl PartialEq for AstExplorer<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Present(left), Self::Present(right)) => {
                subtrees_equal(left.side(), right.side(), Positions::Compare)
            }
            _ => false,
        }
    }
}
