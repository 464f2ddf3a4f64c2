//! Input controller
//!
//! Owns the expression buffer, the session's variable scope and the result
//! display. Edits the buffer for text actions and hands the buffer to the
//! math delegate for everything else. Every delegate failure is caught here
//! and rendered into the display; the buffer is never touched on failure.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::KeypadConfig;
use crate::delegate::{MathDelegate, Scope, Value};
use crate::error::{DelegateError, KeypadError, Operation};
use crate::keypad::{Command, KeypadAction};

/// What the host should do with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key submitted the expression; suppress the default action
    Submitted,
    /// Not handled; let the input field process it
    PassThrough,
}

/// Keypad controller for one session
#[derive(Debug)]
pub struct InputController<D> {
    delegate: D,
    config: KeypadConfig,
    buffer: String,
    scope: Scope,
    display: String,
    last_value: Option<Value>,
    last_error: Option<KeypadError>,
}

impl<D: MathDelegate> InputController<D> {
    /// Creates a controller with the default configuration
    #[must_use]
    pub fn new(delegate: D) -> Self {
        Self::with_config(delegate, KeypadConfig::default())
    }

    /// Creates a controller with a custom configuration
    #[must_use]
    pub fn with_config(delegate: D, config: KeypadConfig) -> Self {
        let display = config.idle_message.clone();
        Self {
            delegate,
            config,
            buffer: String::new(),
            scope: Scope::new(),
            display,
            last_value: None,
            last_error: None,
        }
    }

    /// Current expression buffer
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replaces the buffer, as when the user types into the text field
    pub fn set_buffer(&mut self, text: &str) {
        self.buffer = text.to_string();
    }

    /// Current result display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Variables bound by earlier evaluations
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Value of the last successful evaluation
    #[must_use]
    pub fn last_value(&self) -> Option<&Value> {
        self.last_value.as_ref()
    }

    /// Failure behind the current display, if it shows one
    #[must_use]
    pub fn last_error(&self) -> Option<&KeypadError> {
        self.last_error.as_ref()
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    /// The math delegate
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Appends text to the end of the buffer
    pub fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Removes the last character; no-op on an empty buffer
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Empties the buffer and shows the idle placeholder
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.display = self.config.idle_message.clone();
        self.last_error = None;
    }

    /// Evaluates the buffer numerically, with the session scope
    pub fn evaluate(&mut self) {
        let expr = self.buffer.trim().to_string();
        if expr.is_empty() {
            self.display = self.config.empty_message.clone();
            self.last_error = Some(KeypadError::EmptyExpression);
            return;
        }

        match self.delegate.evaluate(&expr, &mut self.scope) {
            Ok(value) => {
                debug!(expr = %expr, value = %value, "evaluated");
                self.display = value.to_string();
                self.last_value = Some(value);
                self.last_error = None;
            }
            Err(err) => self.render_failure(Operation::Evaluate, err),
        }
    }

    /// Simplifies the buffer symbolically
    pub fn simplify(&mut self) {
        self.run_symbolic(Operation::Simplify, |delegate, expr, _| {
            delegate.simplify(expr)
        });
    }

    /// Differentiates the buffer with respect to the configured variable
    pub fn differentiate(&mut self) {
        self.run_symbolic(Operation::Differentiate, |delegate, expr, config| {
            delegate.derivative(expr, &config.derivative_variable)
        });
    }

    /// Expands the buffer, if the delegate can
    pub fn expand(&mut self) {
        if self.buffer.trim().is_empty() {
            return;
        }
        if !self.delegate.supports(Operation::Expand) {
            info!("delegate has no expand capability");
            self.display = self.config.expand_unavailable_message.clone();
            self.last_error = Some(KeypadError::CapabilityMissing {
                capability: Operation::Expand,
            });
            return;
        }
        self.run_symbolic(Operation::Expand, |delegate, expr, _| delegate.expand(expr));
    }

    /// Runs a decoded keypad action
    pub fn dispatch(&mut self, action: KeypadAction) {
        debug!(?action, "dispatching keypad action");
        match action {
            KeypadAction::Append(text) => self.append(&text),
            KeypadAction::Run(Command::Clear) => self.clear(),
            KeypadAction::Run(Command::Backspace) => self.backspace(),
            KeypadAction::Run(Command::Evaluate) => self.evaluate(),
            KeypadAction::Run(Command::Simplify) => self.simplify(),
            KeypadAction::Run(Command::Differentiate) => self.differentiate(),
            KeypadAction::Run(Command::Expand) => self.expand(),
        }
    }

    /// Handles a key pressed in the expression field; Enter evaluates
    pub fn handle_key(&mut self, key: &str) -> KeyOutcome {
        if key == "Enter" {
            self.evaluate();
            KeyOutcome::Submitted
        } else {
            KeyOutcome::PassThrough
        }
    }

    /// Delay after load before [`run_startup_demo`](Self::run_startup_demo)
    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        self.config.startup_delay()
    }

    /// Simplifies a pre-filled buffer for show. Does nothing on an empty
    /// buffer and ignores any failure.
    pub fn run_startup_demo(&mut self) {
        let expr = self.buffer.trim().to_string();
        if expr.is_empty() {
            return;
        }
        match self.delegate.simplify(&expr) {
            Ok(simplified) => {
                info!(expr = %expr, "startup simplification");
                self.display = format!("{}{}", self.config.startup_prefix, simplified);
            }
            Err(err) => debug!(error = %err, "startup simplification skipped"),
        }
    }

    fn run_symbolic<F>(&mut self, operation: Operation, call: F)
    where
        F: FnOnce(&D, &str, &KeypadConfig) -> Result<String, DelegateError>,
    {
        let expr = self.buffer.trim().to_string();
        if expr.is_empty() {
            return;
        }
        match call(&self.delegate, &expr, &self.config) {
            Ok(text) => {
                debug!(%operation, expr = %expr, result = %text, "symbolic result");
                self.display = text;
                self.last_error = None;
            }
            Err(err) => self.render_failure(operation, err),
        }
    }

    fn render_failure(&mut self, operation: Operation, err: DelegateError) {
        warn!(%operation, error = %err, "delegate rejected expression");
        let prefix = self.config.error_prefixes.for_operation(operation);
        self.display = format!("{prefix}{err}");
        self.last_error = Some(KeypadError::delegate(operation, err));
    }
}
