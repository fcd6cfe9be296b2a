//! Python grammar access and node-shape helpers.
//!
//! Everything that knows the shape of the `tree-sitter-python` grammar lives
//! here: node kind names, field names, where a compound statement keeps its
//! statement list, and how assignments and calls are laid out. The query
//! modules only ask questions through these helpers.

use tree_sitter::Node;

/// Node kinds used by the explorer.
pub(crate) mod kind {
    pub(crate) const MODULE: &str = "module";
    pub(crate) const BLOCK: &str = "block";
    pub(crate) const FUNCTION_DEFINITION: &str = "function_definition";
    pub(crate) const CLASS_DEFINITION: &str = "class_definition";
    pub(crate) const DECORATED_DEFINITION: &str = "decorated_definition";
    pub(crate) const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub(crate) const ASSIGNMENT: &str = "assignment";
    pub(crate) const IF_STATEMENT: &str = "if_statement";
    pub(crate) const ELIF_CLAUSE: &str = "elif_clause";
    pub(crate) const ELSE_CLAUSE: &str = "else_clause";
    pub(crate) const EXCEPT_CLAUSE: &str = "except_clause";
    pub(crate) const EXCEPT_GROUP_CLAUSE: &str = "except_group_clause";
    pub(crate) const FINALLY_CLAUSE: &str = "finally_clause";
    pub(crate) const CASE_CLAUSE: &str = "case_clause";
    pub(crate) const CALL: &str = "call";
    pub(crate) const IDENTIFIER: &str = "identifier";
    pub(crate) const ATTRIBUTE: &str = "attribute";
    pub(crate) const INTEGER: &str = "integer";
    pub(crate) const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
    pub(crate) const ARGUMENT_LIST: &str = "argument_list";
    pub(crate) const SUBSCRIPT: &str = "subscript";
    pub(crate) const TUPLE: &str = "tuple";
    pub(crate) const EXPRESSION_LIST: &str = "expression_list";
    pub(crate) const TUPLE_PATTERN: &str = "tuple_pattern";
    pub(crate) const PATTERN_LIST: &str = "pattern_list";
    pub(crate) const COMMENT: &str = "comment";
}

/// Compound statements whose suite is stored under the `body` field.
const BODY_FIELD_KINDS: &[&str] = &[
    kind::FUNCTION_DEFINITION,
    kind::CLASS_DEFINITION,
    "for_statement",
    "while_statement",
    "with_statement",
    "try_statement",
    kind::ELSE_CLAUSE,
    "match_statement",
];

/// Assignment targets that unpack into several names.
const UNPACKING_TARGET_KINDS: &[&str] = &[
    kind::PATTERN_LIST,
    kind::TUPLE_PATTERN,
    "list_pattern",
    "list_splat_pattern",
];

/// Returns the Tree-sitter grammar for Python.
#[must_use]
pub(crate) fn python_language() -> tree_sitter::Language {
    tree_sitter_python::LANGUAGE.into()
}

/// Returns the source text covered by `node`.
pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Returns true for comments and line continuations, which never count as
/// statements or take part in comparisons.
pub(crate) fn is_trivia(node: Node<'_>) -> bool {
    node.is_extra()
}

/// Returns the named, non-trivia children of `node` in document order.
pub(crate) fn significant_named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !is_trivia(*child))
        .collect()
}

/// Returns every non-trivia child of `node`, anonymous tokens included.
pub(crate) fn significant_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !is_trivia(*child))
        .collect()
}

/// Returns the block holding the statement list owned by `node`.
///
/// Modules and blocks own themselves. Compound statements own their primary
/// suite (`if` and `elif` their consequence). Decorated definitions defer to
/// the definition they wrap. Anything else has no statement list.
pub(crate) fn suite_of(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        kind::MODULE | kind::BLOCK => Some(node),
        kind::DECORATED_DEFINITION => node.child_by_field_name("definition").and_then(suite_of),
        kind::IF_STATEMENT | kind::ELIF_CLAUSE | kind::CASE_CLAUSE => {
            node.child_by_field_name("consequence")
        }
        kind::EXCEPT_CLAUSE | kind::EXCEPT_GROUP_CLAUSE | kind::FINALLY_CLAUSE => {
            let mut cursor = node.walk();
            let block = node
                .named_children(&mut cursor)
                .find(|child| child.kind() == kind::BLOCK);
            block
        }
        other if BODY_FIELD_KINDS.contains(&other) => node.child_by_field_name("body"),
        _ => None,
    }
}

/// Returns the direct statements owned by `node`, or `None` when `node` has
/// no statement list at all.
pub(crate) fn statement_list(node: Node<'_>) -> Option<Vec<Node<'_>>> {
    suite_of(node).map(significant_named_children)
}

/// Returns `node` itself, or the definition inside it when `node` is a
/// decorated definition.
pub(crate) fn undecorated(node: Node<'_>) -> Node<'_> {
    if node.kind() == kind::DECORATED_DEFINITION {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

/// Returns the declared name of a function or class definition.
pub(crate) fn definition_name<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name("name")
        .map(|name| node_text(name, source))
}

/// Returns the assignment carried by `node`.
///
/// Accepts either an `assignment` node or an expression statement whose only
/// expression is an assignment.
pub(crate) fn assignment_of(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        kind::ASSIGNMENT => Some(node),
        kind::EXPRESSION_STATEMENT => match significant_named_children(node).as_slice() {
            [only] if only.kind() == kind::ASSIGNMENT => Some(*only),
            _ => None,
        },
        _ => None,
    }
}

/// Returns the expression finally assigned by a (possibly chained)
/// assignment such as `a = b = 1`. Bare annotations have no value.
pub(crate) fn assigned_value(assignment: Node<'_>) -> Option<Node<'_>> {
    let mut right = assignment.child_by_field_name("right")?;
    while right.kind() == kind::ASSIGNMENT {
        right = right.child_by_field_name("right")?;
    }
    Some(right)
}

/// Returns true when the assignment binds `name` as a plain variable.
///
/// Chained targets (`a = b = 1`) and unpacking targets (`a, b = pair`) bind
/// every identifier they list. Attribute and subscript targets bind nothing.
pub(crate) fn binds_name(assignment: Node<'_>, source: &str, name: &str) -> bool {
    let mut current = Some(assignment);
    while let Some(node) = current.filter(|node| node.kind() == kind::ASSIGNMENT) {
        if let Some(left) = node.child_by_field_name("left") {
            if target_binds(left, source, name) {
                return true;
            }
        }
        current = node.child_by_field_name("right");
    }
    false
}

fn target_binds(target: Node<'_>, source: &str, name: &str) -> bool {
    match target.kind() {
        kind::IDENTIFIER => node_text(target, source) == name,
        k if UNPACKING_TARGET_KINDS.contains(&k) => significant_named_children(target)
            .into_iter()
            .any(|child| target_binds(child, source, name)),
        _ => false,
    }
}

/// Returns the expression wrapped by a bare expression statement.
pub(crate) fn bare_expression(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() != kind::EXPRESSION_STATEMENT {
        return None;
    }
    match significant_named_children(node).as_slice() {
        [only] if only.kind() != kind::ASSIGNMENT => Some(*only),
        _ => None,
    }
}

/// Returns true when `expression` calls a function named `name`.
///
/// Plain calls match on the identifier; method and module calls match on the
/// full dotted callee (`math.sqrt`).
pub(crate) fn calls_function(expression: Node<'_>, source: &str, name: &str) -> bool {
    if expression.kind() != kind::CALL {
        return false;
    }
    expression
        .child_by_field_name("function")
        .filter(|callee| matches!(callee.kind(), kind::IDENTIFIER | kind::ATTRIBUTE))
        .is_some_and(|callee| callee_text(callee, source) == name)
}

fn callee_text(callee: Node<'_>, source: &str) -> String {
    node_text(callee, source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Strips redundant parentheses around an expression.
pub(crate) fn unparenthesized(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while current.kind() == kind::PARENTHESIZED_EXPRESSION {
        match significant_named_children(current).as_slice() {
            [inner] => current = *inner,
            _ => break,
        }
    }
    current
}

/// Returns the `:` token that opens the suite of a compound statement.
pub(crate) fn suite_colon(node: Node<'_>) -> Option<Node<'_>> {
    let suite = suite_of(node).filter(|suite| suite.id() != node.id())?;
    let mut cursor = node.walk();
    let colon = node
        .children(&mut cursor)
        .take_while(|child| child.start_byte() < suite.start_byte())
        .filter(|child| child.kind() == ":")
        .last();
    colon
}
