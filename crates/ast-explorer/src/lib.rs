//! Chainable queries and structural matching over Python syntax trees.
//!
//! This crate answers questions about Python source of the kind automated
//! checkers ask: "does function `foo` assign `x` an integer?", "is the second
//! `elif` test `y == 2`?". Source is parsed with Tree-sitter into a
//! [`ParsedModule`], and every query starts from its [`AstExplorer`] handle.
//!
//! - **Absent results chain** - a lookup that finds nothing returns an absent
//!   handle, and every query on an absent handle is itself absent, empty or
//!   `false`, so chains never need intermediate checks
//! - **Scope-aware lookup** - functions and classes are found wherever they
//!   are nested; variables only in the direct statements of the handle's own
//!   scope
//! - **Two equalities** - `==` compares structure *and* source positions,
//!   while [`AstExplorer::is_equivalent`] compares structure only against a
//!   freshly parsed snippet
//! - **Conditional chains** - `if`/`elif`/`else` decomposes into parallel
//!   condition and body lists ([`Explorers`])
//!
//! # Example
//!
//! ```
//! use ast_explorer::{Literal, ParsedModule};
//!
//! let module = ParsedModule::parse(
//!     "def foo():\n  x = 1\n  if x == 1:\n    y = 2\n  else:\n    y = 3\n",
//! )?;
//! let foo = module.explorer().find_function("foo");
//!
//! assert_eq!(foo.get_variable("x"), Some(Literal::Int(1)));
//! assert!(!module.explorer().has_variable("x"));
//!
//! let chain = foo.find_ifs().get(0)?;
//! let conditions = chain.find_conditions();
//! assert_eq!(conditions.len(), 2);
//! assert!(conditions.get(0)?.is_equivalent("x == 1")?);
//! assert!(conditions.get(1)?.is_absent());
//! # Ok::<(), ast_explorer::ExplorerError>(())
//! ```

mod config;
mod error;
mod explorer;
mod literal;
mod parser;
mod position;
mod scope;
mod snippets;
mod structural;
mod syntax;

pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use explorer::{AstExplorer, Explorers, Located};
pub use literal::Literal;
pub use parser::{ParsedModule, PythonParser, SyntaxErrorInfo};
pub use snippets::{BlockSource, FunctionSource};

#[cfg(test)]
mod tests;
