//! Keypad session walkthrough
//!
//! Drives the mock page with the symbolic engine and prints what the result
//! display shows after each step.
//!
//! Run with: `RUST_LOG=cas_keypad=debug cargo run --example keypad_session`

use cas_keypad::prelude::*;
use tracing_subscriber::EnvFilter;

fn show<D: MathDelegate>(step: &str, session: &SessionDriver<D>) {
    println!(
        "{step:<28} input: {:<16} result: {}",
        session.get_input(),
        session.get_result()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut session = SessionDriver::new(SymbolicDelegate::new());

    println!(
        "Keypad: {} buttons, startup delay {:?}",
        session.keypad().button_count(),
        session.controller().startup_delay()
    );

    session.boot("x^2+2*x+1");
    show("startup", &session);

    session.clear();
    for id in ["btn-6", "btn-times", "btn-7", "btn-evaluate"] {
        session.press(id);
    }
    show("6*7 via buttons", &session);

    session.enter_expression("x=5");
    show("assign", &session);
    session.enter_expression("x+1");
    show("use binding", &session);

    session.type_input("sin(x)*x^2");
    session.press("btn-derivative");
    show("d/dx", &session);

    session.press("btn-expand");
    show("expand", &session);

    session.enter_expression("sin(x");
    show("malformed", &session);

    session.clear();
    session.press("btn-evaluate");
    show("empty", &session);
}
