//! CAS Keypad - input controller for a computer-algebra calculator
//!
//! This crate wires keypad buttons and keyboard input to an external
//! computer-algebra engine and writes the engine's answer back into a result
//! display. It owns the expression buffer, the session's variable scope and
//! the display text; every computation is delegated through the
//! [`MathDelegate`](delegate::MathDelegate) trait.
//!
//! # Example
//!
//! ```rust
//! use cas_keypad::prelude::*;
//!
//! let delegate = ScriptedDelegate::new().on_simplify("x^2+2x+1", "(x + 1)^2");
//! let mut calc = InputController::new(delegate);
//!
//! calc.dispatch(KeypadAction::Append("x^2+2x+1".into()));
//! calc.dispatch(KeypadAction::Run(Command::Simplify));
//! assert_eq!(calc.display(), "(x + 1)^2");
//!
//! // no expand in this engine
//! calc.expand();
//! assert!(calc.display().contains("not supported"));
//! ```

// Allow common test patterns in this crate
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod delegate;
pub mod dom;
pub mod driver;
pub mod error;
pub mod keypad;

#[cfg(feature = "wasm")]
pub mod browser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ErrorPrefixes, KeypadConfig};
    pub use crate::controller::{InputController, KeyOutcome};
    #[cfg(feature = "symbolic")]
    pub use crate::delegate::SymbolicDelegate;
    pub use crate::delegate::{MathDelegate, Scope, ScriptedDelegate, Value};
    pub use crate::dom::{DomElement, DomEvent, MockDom};
    pub use crate::driver::{KeypadDriver, SessionDriver};
    pub use crate::error::{DelegateError, KeypadError, KeypadResult, Operation};
    pub use crate::keypad::{ButtonIntent, Command, Keypad, KeypadAction, Symbol};

    #[cfg(feature = "wasm")]
    pub use crate::browser::BrowserKeypad;
}
