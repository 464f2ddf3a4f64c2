//! End-to-end keypad sessions through the mock page

#![allow(clippy::unwrap_used)]

use cas_keypad::delegate::DelegateCall;
use cas_keypad::prelude::*;

fn scripted() -> ScriptedDelegate {
    ScriptedDelegate::new()
        .on_evaluate("3+4", Value::Number(7.0))
        .on_assign("x=5", "x", Value::Number(5.0))
        .on_evaluate("x+1", Value::Number(6.0))
        .on_simplify("x^2+2x+1", "(x + 1)^2")
        .on_derivative("x^2", "2*x")
        .failing(Operation::Evaluate, "sin(x", "Parenthesis ) expected (char 6)")
}

// ===== Evaluation scenarios =====

#[test]
fn test_evaluate_sum() {
    let mut session = SessionDriver::new(scripted());
    session.enter_expression("3+4");
    assert_eq!(session.get_result(), "7");
}

#[test]
fn test_assignment_persists_in_scope() {
    let mut session = SessionDriver::new(scripted());
    session.enter_expression("x=5");
    assert_eq!(session.get_result(), "5");
    assert_eq!(
        session.controller().scope().get("x"),
        Some(&Value::Number(5.0))
    );

    session.clear();
    session.enter_expression("x+1");
    assert_eq!(session.get_result(), "6");
    assert_eq!(session.controller().scope().len(), 1);
}

#[test]
fn test_malformed_expression_keeps_buffer() {
    let mut session = SessionDriver::new(scripted());
    session.enter_expression("sin(x");
    assert!(session.get_result().starts_with("Error: "));
    assert_eq!(session.get_input(), "sin(x");
    assert!(matches!(
        session.controller().last_error(),
        Some(KeypadError::Delegate {
            operation: Operation::Evaluate,
            ..
        })
    ));
}

#[test]
fn test_empty_evaluate_shows_notice() {
    let mut session = SessionDriver::new(scripted());
    session.press("btn-evaluate");
    assert_eq!(session.get_result(), "Empty expression");
    assert_eq!(session.controller().delegate().call_count(), 0);
}

// ===== Symbolic scenarios =====

#[test]
fn test_simplify_shows_delegate_form() {
    let mut session = SessionDriver::new(scripted());
    session.type_input("x^2+2x+1");
    session.press("btn-simplify");
    assert_eq!(session.get_result(), "(x + 1)^2");
    assert_eq!(session.get_input(), "x^2+2x+1");
}

#[test]
fn test_derivative_uses_x() {
    let mut session = SessionDriver::new(scripted());
    session.type_input("x^2");
    session.press("btn-derivative");
    assert_eq!(session.get_result(), "2*x");
    assert_eq!(
        session.controller().delegate().calls(),
        vec![DelegateCall::derivative("x^2", "x")]
    );
}

#[test]
fn test_symbolic_commands_ignore_empty_buffer() {
    let mut session = SessionDriver::new(scripted());
    for id in ["btn-simplify", "btn-derivative", "btn-expand"] {
        session.press(id);
        assert_eq!(session.get_result(), "Waiting for input...");
    }
    assert_eq!(session.controller().delegate().call_count(), 0);
}

#[test]
fn test_expand_without_capability() {
    let mut session = SessionDriver::new(scripted());
    session.type_input("(x+1)^2");
    session.press("btn-expand");
    assert_eq!(
        session.get_result(),
        "Expand is not supported by the current math engine"
    );
    assert_eq!(session.get_input(), "(x+1)^2");
    assert_eq!(session.controller().delegate().call_count(), 0);
}

#[test]
fn test_expand_with_capability() {
    let delegate = scripted().on_expand("(x+1)^2", "x^2 + 2*x + 1");
    let mut session = SessionDriver::new(delegate);
    session.type_input("(x+1)^2");
    session.press("btn-expand");
    assert_eq!(session.get_result(), "x^2 + 2*x + 1");
}

#[test]
fn test_symbolic_failure_uses_operation_prefix() {
    let delegate = ScriptedDelegate::new().failing(Operation::Simplify, "x+", "Unexpected end");
    let mut session = SessionDriver::new(delegate);
    session.type_input("x+");
    session.press("btn-simplify");
    assert_eq!(session.get_result(), "Simplify error: Unexpected end");
    assert_eq!(session.get_input(), "x+");
}

// ===== Configuration scenarios =====

#[test]
fn test_custom_messages_and_variable() {
    let config = KeypadConfig::from_json_str(
        r#"{
            "idle_message": "Ready",
            "derivative_variable": "t",
            "error_prefixes": { "evaluate": "Oops: " }
        }"#,
    )
    .unwrap();
    let delegate = ScriptedDelegate::new()
        .on_derivative("t^3", "3*t^2")
        .failing(Operation::Evaluate, "1/", "Unexpected end");
    let mut session = SessionDriver::with_config(delegate, config);
    assert_eq!(session.get_result(), "Ready");

    session.type_input("t^3");
    session.press("btn-derivative");
    assert_eq!(session.get_result(), "3*t^2");
    assert_eq!(
        session.controller().delegate().calls()[0].var.as_deref(),
        Some("t")
    );

    session.enter_expression("1/");
    assert_eq!(session.get_result(), "Oops: Unexpected end");
    assert!(session.controller().config().error_prefixes.simplify.starts_with("Simplify"));
}

#[test]
fn test_startup_demo_prefix() {
    let mut session = SessionDriver::new(scripted());
    session.boot("x^2+2x+1");
    assert_eq!(session.get_result(), "Simplified: (x + 1)^2");
    assert_eq!(
        session.controller().startup_delay(),
        std::time::Duration::from_millis(200)
    );
}

#[test]
fn test_startup_demo_ignores_failure() {
    let mut session = SessionDriver::new(scripted());
    session.boot("x^^");
    assert_eq!(session.get_result(), "Waiting for input...");
    assert_eq!(session.get_input(), "x^^");
}

// ===== Real engine scenarios =====

#[cfg(feature = "symbolic")]
mod symbolic {
    use cas_keypad::prelude::*;

    #[test]
    fn test_arithmetic_and_scope() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.enter_expression("3+4");
        assert_eq!(session.get_result(), "7");

        session.enter_expression("x=5");
        session.enter_expression("x+1");
        assert_eq!(session.get_result(), "6");
    }

    #[test]
    fn test_simplify_is_engine_output() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.type_input("x^2+2x+1");
        session.press("btn-simplify");
        assert_eq!(session.get_result(), "(x + 1)^2");
        assert_eq!(session.get_input(), "x^2+2x+1");
    }

    #[test]
    fn test_empty_function_button_reports_error() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.press("btn-sin");
        session.press("btn-evaluate");
        assert!(session.get_result().starts_with("Error: "));
        assert_eq!(session.get_input(), "sin(");

        session.press("btn-simplify");
        assert!(session.get_result().starts_with("Simplify error: "));
        session.press("btn-derivative");
        assert!(session.get_result().starts_with("Derivative error: "));
    }

    #[test]
    fn test_unclosed_group_fails_with_x_bound() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.enter_expression("x=5");
        session.enter_expression("sin(x");
        assert_eq!(session.get_result(), "Error: Parenthesis ) expected (char 6)");
        assert_eq!(session.get_input(), "sin(x");

        session.enter_expression("(1+2");
        assert!(session.get_result().starts_with("Error: "));

        session.type_input("sin(x");
        session.press("btn-simplify");
        assert!(session.get_result().starts_with("Simplify error: "));
        session.press("btn-derivative");
        assert!(session.get_result().starts_with("Derivative error: "));
    }

    #[test]
    fn test_constant_buttons_evaluate() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        for id in ["btn-2", "btn-times", "btn-pi", "btn-evaluate"] {
            session.press(id);
        }
        assert_eq!(session.get_input(), "2*pi");
        assert_eq!(session.get_result(), "6.2831853072");

        session.clear();
        for id in ["btn-ln", "btn-e", "btn-close-paren", "btn-evaluate"] {
            session.press(id);
        }
        assert_eq!(session.get_input(), "log(e)");
        assert_eq!(session.get_result(), "1");
    }

    #[test]
    fn test_division_by_zero_is_not_undefined_symbol() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.enter_expression("1/0");
        assert!(session.get_result().starts_with("Error: "));
        assert!(!session.get_result().contains("Undefined symbol"));
    }

    #[test]
    fn test_expand_is_unavailable() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.type_input("(x+1)^2");
        session.press("btn-expand");
        assert_eq!(
            session.get_result(),
            KeypadConfig::default().expand_unavailable_message
        );
    }

    #[test]
    fn test_malformed_keeps_buffer() {
        let mut session = SessionDriver::new(SymbolicDelegate::new());
        session.enter_expression("sin(x");
        assert!(session.get_result().starts_with("Error: "));
        assert_eq!(session.get_input(), "sin(x");
    }
}
