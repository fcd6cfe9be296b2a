//! Explorer configuration for parsing strictness and search limits.

use serde::{Deserialize, Serialize};

/// Configuration carried by every [`crate::ParsedModule`].
///
/// # Defaults
///
/// - `reject_syntax_errors`: `true`
/// - `max_search_depth`: 1 024
///
/// # Example
///
/// ```
/// use ast_explorer::ExplorerConfig;
///
/// let config = ExplorerConfig::default();
/// assert!(config.reject_syntax_errors());
/// assert_eq!(config.max_search_depth(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Whether source containing syntax errors fails to parse.
    reject_syntax_errors: bool,
    /// Maximum tree depth visited by recursive definition search.
    max_search_depth: usize,
}

impl ExplorerConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(reject_syntax_errors: bool, max_search_depth: usize) -> Self {
        Self {
            reject_syntax_errors,
            max_search_depth,
        }
    }

    /// Returns whether syntax errors make parsing fail.
    ///
    /// When `false`, Tree-sitter's recovered tree is kept and the errors are
    /// available from [`crate::ParsedModule::errors`].
    #[must_use]
    pub const fn reject_syntax_errors(&self) -> bool {
        self.reject_syntax_errors
    }

    /// Returns the maximum depth visited by recursive definition search.
    #[must_use]
    pub const fn max_search_depth(&self) -> usize {
        self.max_search_depth
    }

    /// Returns a copy with `reject_syntax_errors` replaced.
    #[must_use]
    pub const fn with_reject_syntax_errors(mut self, reject: bool) -> Self {
        self.reject_syntax_errors = reject;
        self
    }

    /// Returns a copy with `max_search_depth` replaced.
    #[must_use]
    pub const fn with_max_search_depth(mut self, depth: usize) -> Self {
        self.max_search_depth = depth;
        self
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            reject_syntax_errors: true,
            max_search_depth: 1024,
        }
    }
}
