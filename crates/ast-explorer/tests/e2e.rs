//! End-to-end tests for ast-explorer using insta for snapshot testing.
//!
//! These tests exercise the public API the way a checking tool would, across
//! happy and unhappy paths, with inline snapshots for user-facing output.

use insta::{assert_debug_snapshot, assert_snapshot};
use rstest::{fixture, rstest};

use ast_explorer::{AstExplorer, ExplorerConfig, ExplorerError, Literal, ParsedModule};

const SUBMISSION: &str = "\
import math

RATE = 0.5

@cache
def area(radius):
    result = math.pi * radius ** 2
    return result

class Shape:
    sides = 0

    def describe(self):
        label = str(self.sides)
        if self.sides == 0:
            kind = 'circle'
        elif self.sides < 3:
            kind = None
        else:
            kind = 'polygon'
        return kind

total = area(2)
";

/// Fixture providing a parsed submission.
#[fixture]
fn submission() -> ParsedModule {
    ParsedModule::parse(SUBMISSION).unwrap_or_else(|err| panic!("parse: {err}"))
}

// =============================================================================
// Happy Path: Locating
// =============================================================================

#[rstest]
fn module_level_bindings_are_visible(submission: ParsedModule) {
    let root = submission.explorer();

    assert_eq!(root.get_variable("RATE"), Some(Literal::Float(0.5)));
    assert!(root.find_variable("total").value_is_call("area"));
    assert!(!root.has_variable("result"));
    assert!(!root.has_variable("label"));
}

#[rstest]
fn methods_are_reached_through_their_class(submission: ParsedModule) {
    let root = submission.explorer();
    let describe = root.find_class("Shape").find_function("describe");

    assert!(describe.is_present());
    assert_eq!(describe, root.find_function("describe"));
    assert!(describe.find_variable("label").value_is_call("str"));
    assert!(root.find_class("Shape").find_variable("sides").is_integer());
}

#[rstest]
fn decorated_function_keeps_its_decorator(submission: ParsedModule) {
    let area = submission.explorer().find_function("area");

    assert!(area.find_variable("result").is_present());
    assert_eq!(
        area.is_equivalent(
            "@cache\ndef area(radius):\n  result = math.pi * (radius ** 2)\n  return result"
        ),
        Ok(true)
    );
}

#[rstest]
fn nested_conditional_chain_is_decomposed(submission: ParsedModule) {
    let describe = submission.explorer().find_function("describe");
    let chain = describe
        .find_ifs()
        .get(0)
        .unwrap_or_else(|err| panic!("if statement: {err}"));

    let conditions = chain.find_conditions();
    let bodies = chain.find_if_bodies();
    assert_eq!(conditions.len(), bodies.len());

    let tests: Vec<Option<&str>> = conditions.iter().map(AstExplorer::text).collect();
    assert_debug_snapshot!(tests, @r#"
    [
        Some(
            "self.sides == 0",
        ),
        Some(
            "self.sides < 3",
        ),
        None,
    ]
    "#);

    let values: Vec<Option<Literal>> = bodies
        .iter()
        .map(|body| body.get_variable("kind"))
        .collect();
    assert_eq!(
        values,
        vec![
            Some(Literal::Str("circle".to_owned())),
            Some(Literal::None),
            Some(Literal::Str("polygon".to_owned())),
        ]
    );
}

// =============================================================================
// Happy Path: Source Text
// =============================================================================

#[rstest]
fn function_source_is_sliced_from_whole_lines(submission: ParsedModule) {
    let source = submission
        .function_source("describe")
        .unwrap_or_else(|| panic!("describe should be found"));

    assert_eq!(source.indentation, 4);
    assert_eq!(source.parameters, "self");
    assert!(source.def.starts_with("    def describe(self):\n"));
    assert!(source.body.ends_with("        return kind\n"));
}

#[rstest]
fn block_source_reports_header_and_body(submission: ParsedModule) {
    let block = submission
        .block_source("elif self.sides<3")
        .unwrap_or_else(|| panic!("elif should be found"));

    assert_debug_snapshot!(block, @r#"
    BlockSource {
        header: "elif self.sides < 3",
        indentation: 8,
        body: "            kind = None\n",
    }
    "#);
}

#[test]
fn literal_values_serialise_with_a_type_tag() {
    let values = [
        Literal::Int(3),
        Literal::Str("circle".to_owned()),
        Literal::None,
    ];
    let json = serde_json::to_string(&values).unwrap_or_else(|err| panic!("json: {err}"));

    assert_snapshot!(json, @r#"[{"type":"int","value":3},{"type":"str","value":"circle"},{"type":"none"}]"#);
}

// =============================================================================
// Unhappy Paths
// =============================================================================

#[test]
fn out_of_range_error_message() {
    let module = ParsedModule::parse("if True:\n  pass\n").unwrap_or_else(|err| panic!("{err}"));
    let Err(err) = module.explorer().get(1) else {
        panic!("only one statement exists");
    };

    assert_snapshot!(err.to_string(), @"index 1 is out of range for a sequence of length 1");
}

#[test]
fn foreign_node_error_message() {
    let module = ParsedModule::parse("x = 1").unwrap_or_else(|err| panic!("{err}"));
    let other = ParsedModule::parse("x = 1").unwrap_or_else(|err| panic!("{err}"));

    let Err(err) = AstExplorer::from_node(&module, other.root_node()) else {
        panic!("node belongs to another module");
    };

    assert_snapshot!(err.to_string(), @"invalid explorer input: `module` node does not belong to this module");
}

#[rstest]
#[case("def broken(")]
#[case("x = = 1")]
#[case("This can be anything")]
fn malformed_source_is_a_parse_error(#[case] source: &str) {
    let Err(err) = ParsedModule::parse(source) else {
        panic!("source is malformed");
    };

    assert!(matches!(err, ExplorerError::ParseError { line: 1, .. }));
    assert!(err.to_string().starts_with("failed to parse Python source at 1:"));
}

#[test]
fn malformed_snippet_fails_equivalence() {
    let module = ParsedModule::parse("x = 1").unwrap_or_else(|err| panic!("{err}"));
    let result = module.explorer().is_equivalent("def broken(");

    assert!(matches!(result, Err(ExplorerError::ParseError { .. })));
}

#[test]
fn tolerant_configuration_keeps_broken_source() {
    let config = ExplorerConfig::default().with_reject_syntax_errors(false);
    let module = ParsedModule::parse_with("def ok():\n  x = 1\ny = = 2\n", config)
        .unwrap_or_else(|err| panic!("tolerant parse: {err}"));

    assert!(module.has_errors());
    assert!(!module.errors().is_empty());
    assert!(module.explorer().has_function("ok"));
}

#[test]
fn search_depth_limit_hides_deep_definitions() {
    let source = "def outer():\n  def inner():\n    pass\n";
    let shallow = ExplorerConfig::default().with_max_search_depth(2);
    let module =
        ParsedModule::parse_with(source, shallow).unwrap_or_else(|err| panic!("parse: {err}"));

    assert!(module.explorer().has_function("outer"));
    assert!(!module.explorer().has_function("inner"));
    assert!(module.explorer().find_function("outer").has_function("inner"));
}
