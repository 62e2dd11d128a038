//! End-to-end tests of the symi surface, run through [run_symi](crate::run_symi).

use crate::{run_symi, Opts, SymiResult};

fn run(program: &str) -> SymiResult {
    run_with(program, "pretty", false, false)
}

fn run_with(program: &str, emit_format: &str, check: bool, substitute: bool) -> SymiResult {
    run_symi(Opts {
        program: program.into(),
        emit_format: emit_format.into(),
        check,
        substitute,
        explain_diagnostic: None,
        color: false,
    })
}

#[test]
fn translates_pipe_notation() {
    let result = run("x + 1 | cos");
    assert_eq!(result.code, 0);
    assert_eq!(result.stdout, "cos(x+1)");
    assert!(result.stderr.is_empty());
}

#[test]
fn translates_aliases_and_exponent() {
    let result = run("arccos(x)^2");
    assert_eq!(result.code, 0);
    assert_eq!(result.stdout, "acos(x)**2");
}

#[test]
fn substitute_flag_wraps_leaves() {
    let result = run_with("x+1", "pretty", false, true);
    assert_eq!(result.code, 0);
    assert_eq!(result.stdout, "__SUB(x)+__SUB(1)");
}

#[test]
fn redundant_parens_warn_but_proceed() {
    let result = run("(a+b)");
    assert_eq!(result.code, 0);
    assert_eq!(result.stdout, "a+b");
    assert!(result.stderr.contains("V0001"));
}

#[test]
fn malformed_input_fails() {
    let result = run("cos(x");
    assert_eq!(result.code, 1);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("C0001"));
}

#[test]
fn disjoint_expressions_fail() {
    let result = run("f(x) g(y)");
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("T0001"));
}

#[test]
fn check_stops_after_validation() {
    let result = run_with("1+2*3", "pretty", true, false);
    assert_eq!(result.code, 0);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
}

#[test]
fn debug_emit_dumps_internals() {
    let result = run_with("1+2*3", "debug", false, false);
    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("`+`"));
    assert!(result.stdout.contains("root #"));
}

#[test]
fn explain_known_code() {
    let result = run_symi(Opts {
        program: "".into(),
        emit_format: "pretty".into(),
        check: false,
        substitute: false,
        explain_diagnostic: Some("V0001".into()),
        color: false,
    });
    assert_eq!(result.code, 0);
    assert!(result.page);
    assert!(result.stdout.contains("round-trip"));
}

#[test]
fn explain_unknown_code() {
    let result = run_symi(Opts {
        program: "".into(),
        emit_format: "pretty".into(),
        check: false,
        substitute: false,
        explain_diagnostic: Some("Z9999".into()),
        color: false,
    });
    assert_eq!(result.code, 1);
}
