//! Behaviour-driven development (BDD) step definitions for ast-explorer scenarios.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{AstExplorer, ExplorerError, ParsedModule};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// The module every query starts from.
    module: Option<ParsedModule>,
    /// A second module used for equality comparisons.
    second: Option<ParsedModule>,
    /// Text of the last explored path's match, if any.
    found: Option<Option<String>>,
    /// Condition count and body count of the last decomposed chain.
    decomposed: Option<(usize, usize)>,
    /// Error from the last parse attempt.
    parse_error: Option<ExplorerError>,
}

impl TestWorld {
    fn module(&self) -> &ParsedModule {
        self.module
            .as_ref()
            .expect("Python source should be given first")
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes and expands `\n` escapes.
fn source_text(raw: &str) -> String {
    raw.trim_matches('"').replace("\\n", "\n")
}

/// Follows a `kind name > kind name` path from `start`.
fn explore<'t>(start: AstExplorer<'t>, path: &str) -> AstExplorer<'t> {
    path.split('>').fold(start, |handle, step| {
        match step.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["function", name] => handle.find_function(name),
            ["class", name] => handle.find_class(name),
            ["variable", name] => handle.find_variable(name),
            other => panic!("unknown path step {other:?}"),
        }
    })
}

fn first_if(module: &ParsedModule) -> AstExplorer<'_> {
    module
        .explorer()
        .find_ifs()
        .get(0)
        .expect("source should contain an if statement")
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("Python source {code}")]
fn given_source(world: &RefCell<TestWorld>, code: String) {
    let module = ParsedModule::parse(&source_text(&code)).expect("parse");
    world.borrow_mut().module = Some(module);
}

#[given("a second Python source {code}")]
fn given_second_source(world: &RefCell<TestWorld>, code: String) {
    let module = ParsedModule::parse(&source_text(&code)).expect("parse");
    world.borrow_mut().second = Some(module);
}

#[given("malformed Python source {code}")]
fn given_malformed_source(world: &RefCell<TestWorld>, code: String) {
    let result = ParsedModule::parse(&source_text(&code));
    world.borrow_mut().parse_error = result.err();
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the path {path} is explored")]
fn when_path_explored(world: &RefCell<TestWorld>, path: String) {
    let mut w = world.borrow_mut();
    let text = {
        let found = explore(w.module().explorer(), path.trim_matches('"'));
        found.text().map(str::to_owned)
    };
    w.found = Some(text);
}

#[when("the first if statement is decomposed")]
fn when_first_if_decomposed(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let counts = {
        let chain = first_if(w.module());
        (chain.find_conditions().len(), chain.find_if_bodies().len())
    };
    w.decomposed = Some(counts);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("nothing is found")]
fn then_nothing_found(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let found = w.found.as_ref().expect("a path should have been explored");
    assert_eq!(found, &None, "Expected no match, got {found:?}");
}

#[then("the match reads {text}")]
fn then_match_reads(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    let found = w.found.as_ref().expect("a path should have been explored");
    assert_eq!(found.as_deref(), Some(source_text(&text).as_str()));
}

#[then("there are {conditions} conditions and {bodies} bodies")]
fn then_decomposed_counts(world: &RefCell<TestWorld>, conditions: usize, bodies: usize) {
    let w = world.borrow();
    assert_eq!(w.decomposed, Some((conditions, bodies)));
}

#[then("condition {position} is equivalent to {snippet}")]
fn then_condition_equivalent(world: &RefCell<TestWorld>, position: usize, snippet: String) {
    let w = world.borrow();
    let condition = first_if(w.module())
        .find_conditions()
        .get(position - 1)
        .expect("condition index");
    assert_eq!(condition.is_equivalent(&source_text(&snippet)), Ok(true));
}

#[then("condition {position} is absent")]
fn then_condition_absent(world: &RefCell<TestWorld>, position: usize) {
    let w = world.borrow();
    let condition = first_if(w.module())
        .find_conditions()
        .get(position - 1)
        .expect("condition index");
    assert!(condition.is_absent(), "Expected absent condition, got {condition:?}");
}

#[then("reading condition {position} fails as out of range")]
fn then_condition_out_of_range(world: &RefCell<TestWorld>, position: usize) {
    let w = world.borrow();
    let result = first_if(w.module()).find_conditions().get(position - 1);
    assert!(
        matches!(result, Err(ExplorerError::OutOfRange { .. })),
        "Expected an out of range error, got {result:?}"
    );
}

#[then("the two modules are not strictly equal")]
fn then_not_strictly_equal(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let second = w.second.as_ref().expect("second source");
    assert_ne!(w.module().explorer(), second.explorer());
}

#[then("the first module is equivalent to the second source")]
fn then_equivalent_to_second(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let second = w.second.as_ref().expect("second source");
    assert_eq!(w.module().explorer().is_equivalent(second.source()), Ok(true));
}

#[then("parsing failed at line {line}")]
fn then_parse_failed(world: &RefCell<TestWorld>, line: u32) {
    let w = world.borrow();
    let error = w.parse_error.as_ref().expect("parsing should have failed");
    assert!(
        matches!(error, ExplorerError::ParseError { line: actual, .. } if *actual == line),
        "Expected a parse error at line {line}, got {error:?}"
    );
}

// =============================================================================
// Scenario Bindings
// =============================================================================

#[scenario(
    path = "tests/features/ast_explorer.feature",
    name = "Local variables stay inside their function"
)]
fn local_variables_scoped(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/ast_explorer.feature",
    name = "Nested functions are found recursively but keep their own scope"
)]
fn nested_functions_scoped(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/ast_explorer.feature",
    name = "Absent results propagate through long chains"
)]
fn absent_results_propagate(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/ast_explorer.feature",
    name = "Conditional chains decompose into parallel lists"
)]
fn conditional_chains_decompose(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/ast_explorer.feature",
    name = "Strict equality tracks positions while equivalence does not"
)]
fn strict_equality_versus_equivalence(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/ast_explorer.feature",
    name = "Malformed source is rejected with its location"
)]
fn malformed_source_rejected(world: RefCell<TestWorld>) {
    drop(world);
}
