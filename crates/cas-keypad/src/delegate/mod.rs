//! Math delegate seam
//!
//! The controller never evaluates anything itself. Every numeric or symbolic
//! operation goes through a [`MathDelegate`], an opaque computer-algebra
//! engine that receives the expression text (and, for evaluation, the
//! session's variable scope) and answers with text or a failure message.

mod scripted;
#[cfg(feature = "symbolic")]
mod symbolic;

pub use scripted::{DelegateCall, Scripted, ScriptedDelegate};
#[cfg(feature = "symbolic")]
pub use symbolic::SymbolicDelegate;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DelegateError, Operation};

/// A value produced by delegated evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Plain scalar
    Number(f64),
    /// Boolean result of a comparison
    Boolean(bool),
    /// Object-typed result (matrix, complex number, residual expression)
    /// carried as its textual representation
    Object(String),
}

impl Value {
    /// Returns the scalar, if this is a number
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Boolean(_) | Self::Object(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Object(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Formats a number for display (removes trailing zeros)
///
/// Magnitudes below `1e-6` switch to scientific notation so they never
/// round to `0`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else if n.abs() < 1e-6 {
        format!("{n:e}")
    } else if n.is_finite() {
        let s = format!("{:.10}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{n}")
    }
}

/// Variable name to last-assigned value, persisting across evaluations
///
/// Owned by the controller for the lifetime of a session. Only delegates
/// write to it, as a side effect of evaluating assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    vars: BTreeMap<String, Value>,
}

impl Scope {
    /// Creates an empty scope
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any earlier binding
    pub fn assign(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// Looks up a variable
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Number of bound variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variable is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates bindings in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Scalar bindings only, for engines that substitute numbers
    #[must_use]
    pub fn numeric_bindings(&self) -> Vec<(&str, f64)> {
        self.iter()
            .filter_map(|(name, value)| value.as_number().map(|n| (name, n)))
            .collect()
    }
}

/// External computer-algebra engine the controller delegates to
pub trait MathDelegate {
    /// Evaluates `expr`, possibly binding variables in `scope`
    fn evaluate(&self, expr: &str, scope: &mut Scope) -> Result<Value, DelegateError>;

    /// Simplifies `expr` symbolically
    fn simplify(&self, expr: &str) -> Result<String, DelegateError>;

    /// Differentiates `expr` with respect to `var`
    fn derivative(&self, expr: &str, var: &str) -> Result<String, DelegateError>;

    /// Probes whether an operation is available. Expansion is optional and
    /// off unless an engine says otherwise.
    fn supports(&self, operation: Operation) -> bool {
        !matches!(operation, Operation::Expand)
    }

    /// Expands `expr`; only called after `supports(Operation::Expand)`
    fn expand(&self, expr: &str) -> Result<String, DelegateError> {
        Err(DelegateError::new(format!("expand is not available for '{expr}'")))
    }
}
