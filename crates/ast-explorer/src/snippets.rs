//! Source-text extraction backed by the syntax tree.
//!
//! These helpers answer text questions ("what is the body of `if a == 1`?")
//! by locating the node first and then slicing whole lines out of the source,
//! so the results keep the author's indentation and blank lines.

use std::ops::Range;

use serde::Serialize;
use tracing::trace;
use tree_sitter::Node;

use crate::parser::ParsedModule;
use crate::position::{line_end, line_start};
use crate::scope::{Reach, SEARCH_TARGET, find_first};
use crate::syntax::{definition_name, kind, node_text, suite_colon, suite_of};

/// The source of a function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSource {
    /// The definition from the start of its `def` line through the end of
    /// its last body line.
    pub def: String,
    /// The column at which `def` starts.
    pub indentation: usize,
    /// The body lines of the function.
    pub body: String,
    /// The parameter list without its parentheses.
    pub parameters: String,
}

/// The source of a compound statement's header and suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSource {
    /// The header as written, without its trailing colon.
    pub header: String,
    /// The column at which the header starts.
    pub indentation: usize,
    /// The body lines of the suite.
    pub body: String,
}

impl ParsedModule {
    /// Returns the source of the first function named `name`, searching
    /// nested scopes and blocks.
    #[must_use]
    pub fn function_source(&self, name: &str) -> Option<FunctionSource> {
        let source = self.source();
        let found = find_first(self.root_node(), self.nested_reach(), |node| {
            node.kind() == kind::FUNCTION_DEFINITION
                && definition_name(node, source) == Some(name)
        });
        trace!(
            target: SEARCH_TARGET,
            symbol = name,
            found = found.is_some(),
            "function source lookup"
        );

        let function = found?;
        let suite = suite_of(function)?;
        let parameters = function
            .child_by_field_name("parameters")
            .map(|list| node_text(list, source))
            .map(|text| {
                text.strip_prefix('(')
                    .and_then(|inner| inner.strip_suffix(')'))
                    .unwrap_or(text)
            })
            .unwrap_or_default();

        Some(FunctionSource {
            def: slice(source, whole_lines(source, function.start_byte(), function))?,
            indentation: function.start_position().column,
            body: slice(source, body_lines(source, function, suite))?,
            parameters: parameters.to_owned(),
        })
    }

    /// Returns the first compound statement whose header matches `header`.
    ///
    /// Headers are compared with all whitespace removed, and a trailing `:`
    /// on `header` is optional, so `"if a==1"` finds `if a == 1:`.
    #[must_use]
    pub fn block_source(&self, header: &str) -> Option<BlockSource> {
        let source = self.source();
        let wanted = squeeze(header.trim_end().trim_end_matches(':'));

        let found = find_first(self.root_node(), self.nested_reach(), |node| {
            header_of(node, source).is_some_and(|written| squeeze(written) == wanted)
        });
        trace!(
            target: SEARCH_TARGET,
            header,
            found = found.is_some(),
            "block source lookup"
        );

        let statement = found?;
        let suite = suite_of(statement)?;
        Some(BlockSource {
            header: header_of(statement, source)?.to_owned(),
            indentation: statement.start_position().column,
            body: slice(source, body_lines(source, statement, suite))?,
        })
    }

    /// Returns the source with every comment removed.
    ///
    /// Everything else, including the whitespace around each comment, is
    /// kept as written.
    #[must_use]
    pub fn without_comments(&self) -> String {
        let source = self.source();
        let mut comments = Vec::new();
        collect_comments(self.root_node(), &mut comments);

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for comment in comments {
            out.push_str(source.get(cursor..comment.start).unwrap_or_default());
            cursor = comment.end;
        }
        out.push_str(source.get(cursor..).unwrap_or_default());
        out
    }

    const fn nested_reach(&self) -> Reach {
        Reach::Nested {
            max_depth: self.config().max_search_depth(),
        }
    }
}

/// Returns the header text of a compound statement: everything before the
/// colon that opens its suite.
fn header_of<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    let colon = suite_colon(node)?;
    source
        .get(node.start_byte()..colon.start_byte())
        .map(str::trim_end)
}

fn squeeze(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Byte offset just past the last non-whitespace character of `node`.
fn content_end(source: &str, node: Node<'_>) -> usize {
    let end = node.end_byte();
    source.get(..end).map_or(end, |before| before.trim_end().len())
}

/// Extends `start..node` to whole lines: back to the start of the first line
/// and on past the newline that ends the node's last line.
fn whole_lines(source: &str, start: usize, node: Node<'_>) -> Range<usize> {
    line_start(source, start)..line_end(source, content_end(source, node))
}

/// The lines of `suite`. A suite sharing its line with the header starts at
/// the suite itself rather than at the start of the line.
fn body_lines(source: &str, header: Node<'_>, suite: Node<'_>) -> Range<usize> {
    let lines = whole_lines(source, suite.start_byte(), suite);
    if suite.start_position().row == header.start_position().row {
        suite.start_byte()..lines.end
    } else {
        lines
    }
}

fn slice(source: &str, range: Range<usize>) -> Option<String> {
    source.get(range).map(str::to_owned)
}

fn collect_comments(node: Node<'_>, comments: &mut Vec<Range<usize>>) {
    if node.kind() == kind::COMMENT {
        comments.push(node.byte_range());
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(child, comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_source_keeps_lines_and_parameters() {
        let code = "\na = 1\n\ndef b(d, e):\n  a = 2\n\ndef c():\n  a = 1\n";
        let module = ParsedModule::parse(code).expect("parse");

        let function = module.function_source("b").expect("function b");

        assert_eq!(function.def, "def b(d, e):\n  a = 2\n");
        assert_eq!(function.indentation, 0);
        assert_eq!(function.body, "  a = 2\n");
        assert_eq!(function.parameters, "d, e");
    }

    #[test]
    fn nested_function_source_reports_its_indentation() {
        let code = "class K:\n    def m(self):\n        return 1\n";
        let module = ParsedModule::parse(code).expect("parse");

        let method = module.function_source("m").expect("method m");

        assert_eq!(method.def, "    def m(self):\n        return 1\n");
        assert_eq!(method.indentation, 4);
        assert_eq!(method.parameters, "self");
    }

    #[test]
    fn missing_function_has_no_source() {
        let module = ParsedModule::parse("x = 1\n").expect("parse");
        assert_eq!(module.function_source("b"), None);
    }

    const BLOCKS: &str = "\na = 1\n\nif a == 1:\n  a = 2\n  b = 3\n  if b == 3:\n    a = 4\n\nfor i in range(10):\n  a = 1\n";

    #[test]
    fn block_source_finds_if_body() {
        let module = ParsedModule::parse(BLOCKS).expect("parse");

        for header in ["if a == 1", "if a==1:", "if  a == 1 :"] {
            let block = module.block_source(header).expect("if block");
            assert_eq!(block.header, "if a == 1");
            assert_eq!(block.indentation, 0);
            assert_eq!(block.body, "  a = 2\n  b = 3\n  if b == 3:\n    a = 4\n");
        }
    }

    #[test]
    fn block_source_finds_loops_and_nested_blocks() {
        let module = ParsedModule::parse(BLOCKS).expect("parse");

        let for_loop = module.block_source("for i in range(10)").expect("for block");
        assert_eq!(for_loop.body, "  a = 1\n");

        let nested = module.block_source("if b == 3").expect("nested if");
        assert_eq!(nested.indentation, 2);
        assert_eq!(nested.body, "    a = 4\n");
    }

    #[test]
    fn comments_are_removed_but_whitespace_is_kept() {
        let code = "\na = 1\n# comment\ndef b(d, e):\n  a = 2\n  # comment\n  return a #comment\n";
        let module = ParsedModule::parse(code).expect("parse");

        assert_eq!(
            module.without_comments(),
            "\na = 1\n\ndef b(d, e):\n  a = 2\n  \n  return a \n"
        );
    }

    #[test]
    fn hash_inside_strings_is_not_a_comment() {
        let module = ParsedModule::parse("x = '# not a comment'  # real\n").expect("parse");
        assert_eq!(module.without_comments(), "x = '# not a comment'  \n");
    }
}
