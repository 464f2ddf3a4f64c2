//! Scripted delegate
//!
//! Answers from a fixed table of canned responses and records every call,
//! so controller behavior can be checked without a real math engine.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{MathDelegate, Scope, Value};
use crate::error::{DelegateError, Operation};

/// A canned delegate response
#[derive(Debug, Clone, PartialEq)]
pub enum Scripted {
    /// Evaluation result
    Value(Value),
    /// Evaluation that binds `name` to the value and returns it
    Assign(String, Value),
    /// Symbolic result text
    Text(String),
    /// Failure with the given message
    Fail(String),
}

/// A call received by a [`ScriptedDelegate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateCall {
    /// Which capability was invoked
    pub operation: Operation,
    /// Expression text as received
    pub expr: String,
    /// Differentiation variable, for derivative calls
    pub var: Option<String>,
}

impl DelegateCall {
    /// A call that carries only an expression
    #[must_use]
    pub fn new(operation: Operation, expr: &str) -> Self {
        Self {
            operation,
            expr: expr.to_string(),
            var: None,
        }
    }

    /// A derivative call with respect to `var`
    #[must_use]
    pub fn derivative(expr: &str, var: &str) -> Self {
        Self {
            var: Some(var.to_string()),
            ..Self::new(Operation::Differentiate, expr)
        }
    }
}

/// Delegate backed by a response table
#[derive(Debug, Default)]
pub struct ScriptedDelegate {
    responses: HashMap<(Operation, String), Scripted>,
    expand_available: bool,
    calls: RefCell<Vec<DelegateCall>>,
}

impl ScriptedDelegate {
    /// Creates a delegate with no responses and no expand capability
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a response for an operation on an exact expression
    #[must_use]
    pub fn respond(mut self, operation: Operation, expr: &str, response: Scripted) -> Self {
        self.responses.insert((operation, expr.to_string()), response);
        self
    }

    /// Evaluating `expr` yields `value`
    #[must_use]
    pub fn on_evaluate(self, expr: &str, value: Value) -> Self {
        self.respond(Operation::Evaluate, expr, Scripted::Value(value))
    }

    /// Evaluating `expr` binds `name` to `value`
    #[must_use]
    pub fn on_assign(self, expr: &str, name: &str, value: Value) -> Self {
        self.respond(
            Operation::Evaluate,
            expr,
            Scripted::Assign(name.to_string(), value),
        )
    }

    /// Simplifying `expr` yields `text`
    #[must_use]
    pub fn on_simplify(self, expr: &str, text: &str) -> Self {
        self.respond(Operation::Simplify, expr, Scripted::Text(text.to_string()))
    }

    /// Differentiating `expr` yields `text`
    #[must_use]
    pub fn on_derivative(self, expr: &str, text: &str) -> Self {
        self.respond(
            Operation::Differentiate,
            expr,
            Scripted::Text(text.to_string()),
        )
    }

    /// Expanding `expr` yields `text`; also enables the expand capability
    #[must_use]
    pub fn on_expand(mut self, expr: &str, text: &str) -> Self {
        self.expand_available = true;
        self.respond(Operation::Expand, expr, Scripted::Text(text.to_string()))
    }

    /// `operation` on `expr` fails with `message`
    #[must_use]
    pub fn failing(self, operation: Operation, expr: &str, message: &str) -> Self {
        self.respond(operation, expr, Scripted::Fail(message.to_string()))
    }

    /// Turns the expand capability on or off
    #[must_use]
    pub fn with_expand(mut self, available: bool) -> Self {
        self.expand_available = available;
        self
    }

    /// All calls received so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<DelegateCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn lookup(&self, call: DelegateCall) -> Result<&Scripted, DelegateError> {
        let key = (call.operation, call.expr.clone());
        self.calls.borrow_mut().push(call);
        self.responses.get(&key).ok_or_else(|| {
            DelegateError::new(format!("No scripted {} for '{}'", key.0, key.1))
        })
    }

    fn text(&self, call: DelegateCall) -> Result<String, DelegateError> {
        match self.lookup(call)? {
            Scripted::Text(text) => Ok(text.clone()),
            Scripted::Value(value) | Scripted::Assign(_, value) => Ok(value.to_string()),
            Scripted::Fail(message) => Err(DelegateError::new(message.clone())),
        }
    }
}

impl MathDelegate for ScriptedDelegate {
    fn evaluate(&self, expr: &str, scope: &mut Scope) -> Result<Value, DelegateError> {
        match self.lookup(DelegateCall::new(Operation::Evaluate, expr))? {
            Scripted::Value(value) => Ok(value.clone()),
            Scripted::Assign(name, value) => {
                scope.assign(name, value.clone());
                Ok(value.clone())
            }
            Scripted::Text(text) => Ok(Value::Object(text.clone())),
            Scripted::Fail(message) => Err(DelegateError::new(message.clone())),
        }
    }

    fn simplify(&self, expr: &str) -> Result<String, DelegateError> {
        self.text(DelegateCall::new(Operation::Simplify, expr))
    }

    fn derivative(&self, expr: &str, var: &str) -> Result<String, DelegateError> {
        self.text(DelegateCall::derivative(expr, var))
    }

    fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::Expand => self.expand_available,
            Operation::Evaluate | Operation::Simplify | Operation::Differentiate => true,
        }
    }

    fn expand(&self, expr: &str) -> Result<String, DelegateError> {
        self.text(DelegateCall::new(Operation::Expand, expr))
    }
}
