//! Tree-sitter parsing wrapper for Python source.
//!
//! [`ParsedModule`] owns a parsed tree together with the source text it came
//! from and the [`ExplorerConfig`] it was parsed under. Explorer handles
//! borrow from it, so no handle can outlive the tree it points into.

use std::ops::Range;

use tracing::debug;

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::explorer::AstExplorer;
use crate::position::point_to_one_based;
use crate::syntax::{node_text, python_language};

pub(crate) const PARSE_TARGET: &str = "ast_explorer::parse";

/// A parsed Python module.
///
/// Tree-sitter is error-tolerant. Under the default configuration any
/// syntax error makes parsing fail; with
/// [`ExplorerConfig::reject_syntax_errors`] disabled the recovered tree is
/// kept and its errors are reported by [`ParsedModule::errors`].
#[derive(Debug)]
pub struct ParsedModule {
    tree: tree_sitter::Tree,
    source: String,
    config: ExplorerConfig,
}

impl ParsedModule {
    /// Parses `source` under the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::ParseError`] if the source contains syntax
    /// errors, or [`ExplorerError::ParserInitError`] if the grammar cannot
    /// be loaded.
    pub fn parse(source: &str) -> Result<Self, ExplorerError> {
        Self::parse_with(source, ExplorerConfig::default())
    }

    /// Parses `source` under an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::ParseError`] if the source contains syntax
    /// errors and the configuration rejects them, or
    /// [`ExplorerError::ParserInitError`] if the grammar cannot be loaded.
    pub fn parse_with(source: &str, config: ExplorerConfig) -> Result<Self, ExplorerError> {
        PythonParser::new()?.parse(source, config)
    }

    /// Returns a present handle wrapping the module root.
    #[must_use]
    pub fn explorer(&self) -> AstExplorer<'_> {
        AstExplorer::root(self)
    }

    /// Returns the Tree-sitter tree handles point into.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the Python source the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the configuration the module was parsed under.
    #[must_use]
    pub const fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Returns the `module` node at the root of the tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns true when Tree-sitter had to recover from a syntax error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.root_node().has_error()
    }

    /// Lists the syntax errors Tree-sitter recovered from, in document
    /// order. Empty for a clean parse.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut found = Vec::new();
        push_syntax_errors(self.root_node(), self.source(), &mut found);
        found
    }
}

/// A syntax error recovered by Tree-sitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Source bytes covered by the ERROR or MISSING node.
    pub byte_range: Range<usize>,
    /// One-based line of the first offending byte.
    pub line: u32,
    /// One-based column of the first offending byte.
    pub column: u32,
    /// The offending source text, elided past 50 characters.
    pub context: String,
    /// `"syntax error"`, or `"missing <token>"` for an inserted token.
    pub message: String,
}

/// Longest error context kept before it is elided.
const CONTEXT_CHARS: usize = 50;

impl SyntaxErrorInfo {
    fn new(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            String::from("syntax error")
        };

        Self {
            byte_range: node.byte_range(),
            line,
            column,
            context: elide(node_text(node, source)),
            message,
        }
    }

    fn into_error(self) -> ExplorerError {
        let message = if self.context.is_empty() {
            self.message
        } else {
            format!("{} near `{}`", self.message, self.context)
        };
        ExplorerError::parse(self.line, self.column, message)
    }
}

fn elide(text: &str) -> String {
    if text.chars().count() <= CONTEXT_CHARS {
        return text.to_owned();
    }
    let kept: String = text.chars().take(CONTEXT_CHARS - 3).collect();
    kept + "..."
}

/// Tree-sitter parser configured for Python.
pub struct PythonParser {
    inner: tree_sitter::Parser,
}

impl PythonParser {
    /// Creates a new Python parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised
    /// with the Python grammar.
    pub fn new() -> Result<Self, ExplorerError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&python_language())
            .map_err(|e| ExplorerError::parser_init(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Parses source code into a [`ParsedModule`].
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::ParseError`] if Tree-sitter produces no
    /// tree, or if the tree contains syntax errors and `config` rejects
    /// them.
    pub fn parse(
        &mut self,
        source: &str,
        config: ExplorerConfig,
    ) -> Result<ParsedModule, ExplorerError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| ExplorerError::parse(1, 1, "parsing failed"))?;

        let module = ParsedModule {
            tree,
            source: source.to_owned(),
            config,
        };

        let has_errors = module.has_errors();
        debug!(
            target: PARSE_TARGET,
            source_bytes = source.len(),
            has_errors,
            "parsed Python source"
        );

        if has_errors && module.config.reject_syntax_errors() {
            let first = module.errors().into_iter().next().map_or_else(
                || ExplorerError::parse(1, 1, "syntax error"),
                SyntaxErrorInfo::into_error,
            );
            return Err(first);
        }

        Ok(module)
    }
}

/// Pushes every ERROR and MISSING node below `node` in document order,
/// skipping subtrees that contain none.
fn push_syntax_errors(
    node: tree_sitter::Node<'_>,
    source: &str,
    found: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        found.push(SyntaxErrorInfo::new(node, source));
    }
    if node.has_error() {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .for_each(|child| push_syntax_errors(child, source, found));
    }
}
