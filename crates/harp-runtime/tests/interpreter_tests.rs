//! Evaluation semantics: arithmetic domains, logic, scopes, and errors

mod common;

use common::*;
use common::assert_eq;
use harp_runtime::{error_codes, Value};
use rstest::rstest;

// ============================================================================
// Arithmetic and coercion
// ============================================================================

#[rstest]
#[case("2 + 3 * 4;", 14)]
#[case("(2 + 3) * 4;", 20)]
#[case("10 - 4 - 3;", 3)]
#[case("7 / 2;", 3)]
#[case("-7 / 2;", -3)]
#[case("-(3 - 5);", 2)]
#[case("\"1\" + 1;", 2)]
#[case("\"20\" / \"4\";", 5)]
#[case("-\"8\";", -8)]
fn test_int_results(#[case] source: &str, #[case] expected: i64) {
    assert_eval_int(source, expected);
}

#[rstest]
#[case("1.5 + 1;", 2.5)]
#[case("\"1.5\" + 1;", 2.5)]
#[case("1 / 4.0;", 0.25)]
#[case("\"0.5\" * \"4\";", 2.0)]
#[case("-2.5;", -2.5)]
#[case("3.0 - \"1\";", 2.0)]
fn test_double_results(#[case] source: &str, #[case] expected: f64) {
    assert_eval_double(source, expected);
}

#[rstest]
#[case("1 < 2;", true)]
#[case("2 <= 2;", true)]
#[case("3 > 4;", false)]
#[case("1.5 >= 1;", true)]
#[case("\"10\" > 9;", true)]
#[case("1 == 1;", true)]
#[case("1 == 1.0;", false)]
#[case("\"1\" == 1;", false)]
#[case("\"a\" == \"a\";", true)]
#[case("null == null;", true)]
#[case("null != false;", true)]
#[case("!0;", false)]
#[case("!\"\";", false)]
#[case("!null;", true)]
fn test_bool_results(#[case] source: &str, #[case] expected: bool) {
    assert_eval_bool(source, expected);
}

#[rstest]
#[case("1 / 0;", error_codes::DIVISION_BY_ZERO)]
#[case("1.0 / 0;", error_codes::DIVISION_BY_ZERO)]
#[case("\"x\" + 1;", error_codes::COERCION_FAILURE)]
#[case("true + 1;", error_codes::COERCION_FAILURE)]
#[case("null < 1;", error_codes::COERCION_FAILURE)]
#[case("-false;", error_codes::COERCION_FAILURE)]
#[case("print + 1;", error_codes::COERCION_FAILURE)]
#[case("9223372036854775807 + 1;", error_codes::INTEGER_OVERFLOW)]
#[case("y;", error_codes::UNDEFINED_VARIABLE)]
#[case("y = 1;", error_codes::UNDEFINED_VARIABLE)]
#[case("int x = 1; x();", error_codes::NOT_CALLABLE)]
#[case("\"f\"();", error_codes::NOT_CALLABLE)]
#[case("print(1, 2);", error_codes::ARITY_MISMATCH)]
#[case("clock(1);", error_codes::ARITY_MISMATCH)]
#[case("func f(int a) { } f(1, 2);", error_codes::ARITY_MISMATCH)]
fn test_runtime_errors(#[case] source: &str, #[case] code: &str) {
    assert_error_code(source, code);
}

// ============================================================================
// Logic
// ============================================================================

#[test]
fn test_logical_operators_return_operands() {
    assert_eval_int("1 or 2;", 1);
    assert_eval_int("null or 2;", 2);
    assert_eval_int("1 and 2;", 2);
    assert_eval_null("null and 2;");
    assert_eval_bool("false or false;", false);
}

#[test]
fn test_short_circuit_skips_right_operand() {
    assert_eval_bool("false and (1/0);", false);
    assert_eval_bool("true or undefined_name;", true);
    assert_eq!(output_of("false and print(1); true or print(2);"), "");
}

#[test]
fn test_truthiness_in_conditions() {
    let output = output_of(
        "if (0) print(\"zero\");\nif (\"\") print(\"empty\");\nif (null) print(\"null\"); else print(\"no\");",
    );
    assert_eq!(output, "zero\nempty\nno\n");
}

// ============================================================================
// Scopes
// ============================================================================

#[test]
fn test_block_shadowing() {
    assert_eval_int("int x = 1; { int x = 2; } x;", 1);
}

#[test]
fn test_nested_blocks_see_outer_bindings() {
    assert_eval_int("int x = 1; { { { x = x + 10; } } } x;", 11);
}

#[test]
fn test_redeclaration_in_same_scope_overwrites() {
    assert_eval_int("int x = 1; int x = 2; x;", 2);
}

#[test]
fn test_for_loop_prints_and_terminates() {
    assert_eq!(
        output_of("for (int i = 0; i < 3; i = i + 1) print(i);"),
        "0\n1\n2\n"
    );
}

#[test]
fn test_for_loop_variable_is_scoped() {
    let (result, _) = run("for (int i = 0; i < 1; i = i + 1) { } i;");
    let diags = result.unwrap_err();
    assert_eq!(diags[0].code, error_codes::UNDEFINED_VARIABLE);
}

#[test]
fn test_for_without_init_uses_outer_variable() {
    assert_eval_int("int i = 0; for (; i < 4;) i = i + 2; i;", 4);
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_without_return_yields_null() {
    assert_eval_null("func f() { 1; } f();");
}

#[test]
fn test_recursion() {
    assert_eval_int(
        "func fib(int n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } fib(15);",
        610,
    );
}

#[test]
fn test_arguments_evaluated_left_to_right() {
    let output = output_of(
        "func two(int a, int b) { return null; }\ntwo(print(1), print(2));",
    );
    assert_eq!(output, "1\n2\n");
}

#[test]
fn test_functions_are_values() {
    assert_eval_int(
        "func twice(int n) { return n * 2; } func apply(int f, int x) { return f(x); } apply(twice, 21);",
        42,
    );
}

#[test]
fn test_function_display() {
    assert_eq!(output_of("func f() { } print(f); print(clock);"), "<fn f>\n<native fn clock>\n");
}

#[test]
fn test_function_identity_equality() {
    assert_eval_bool("func f() { } f == f;", true);
    assert_eval_bool("func f() { } func g() { } f == g;", false);
}

#[test]
fn test_clock_returns_int() {
    match eval_ok("clock();") {
        Value::Int(ms) => assert!(ms > 0),
        other => panic!("expected int, got {:?}", other),
    }
}

#[test]
fn test_print_returns_null() {
    let (result, output) = run("print(\"x\");");
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(output, "x\n");
}

#[test]
fn test_print_without_argument_prints_blank_line() {
    let (result, output) = run("print(1); print(); print(2);");
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(output, "1\n\n2\n");
}

#[test]
fn test_print_arity_message() {
    let (result, output) = run("print(1, 2);");
    let diags = result.unwrap_err();
    assert_eq!(diags[0].message, "Expected 0 to 1 argument(s) but got 2 when calling 'print'");
    assert_eq!(output, "");
}

#[test]
fn test_error_stops_execution() {
    let (result, output) = run("print(1); print(1 / 0); print(2);");
    assert!(result.is_err());
    assert_eq!(output, "1\n");
}

#[test]
fn test_runtime_error_position() {
    let (result, _) = run("int a = 1;\n\nmissing + a;");
    let diags = result.unwrap_err();
    assert_eq!(diags[0].line, 3);
    assert_eq!(diags[0].column, 1);
    assert_eq!(diags[0].lexeme, "missing");
}
