//! Result and error types for the keypad controller.
//!
//! Every failure here is caught at the boundary of the action that caused it
//! and rendered into the result display. Only configuration loading hands an
//! error back to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for keypad operations
pub type KeypadResult<T> = Result<T, KeypadError>;

/// Delegated operations that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Numeric evaluation with the variable scope
    Evaluate,
    /// Symbolic simplification
    Simplify,
    /// Symbolic differentiation
    Differentiate,
    /// Symbolic expansion
    Expand,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Evaluate => "evaluate",
            Self::Simplify => "simplify",
            Self::Differentiate => "derivative",
            Self::Expand => "expand",
        };
        f.write_str(name)
    }
}

/// Failure text reported by the math delegate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DelegateError {
    /// Human-readable failure text
    pub message: String,
}

impl DelegateError {
    /// Creates a delegate error from any message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the keypad controller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeypadError {
    /// An operation was attempted on a blank buffer
    #[error("Empty expression")]
    EmptyExpression,

    /// The delegate rejected the expression
    #[error("{operation} failed: {message}")]
    Delegate {
        /// Which delegated call failed
        operation: Operation,
        /// Delegate failure text
        message: String,
    },

    /// An optional delegate capability is absent
    #[error("Capability not available: {capability}")]
    CapabilityMissing {
        /// The missing capability
        capability: Operation,
    },

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl KeypadError {
    /// Wraps a delegate failure for the given operation
    #[must_use]
    pub fn delegate(operation: Operation, err: DelegateError) -> Self {
        Self::Delegate {
            operation,
            message: err.message,
        }
    }
}

impl From<serde_json::Error> for KeypadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for KeypadError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display_matches_action_names() {
        assert_eq!(Operation::Evaluate.to_string(), "evaluate");
        assert_eq!(Operation::Simplify.to_string(), "simplify");
        assert_eq!(Operation::Differentiate.to_string(), "derivative");
        assert_eq!(Operation::Expand.to_string(), "expand");
    }

    #[test]
    fn test_delegate_error_display() {
        let err = DelegateError::new("Unexpected end of input");
        assert_eq!(err.to_string(), "Unexpected end of input");
    }

    #[test]
    fn test_keypad_error_display() {
        assert_eq!(KeypadError::EmptyExpression.to_string(), "Empty expression");

        let err = KeypadError::delegate(Operation::Simplify, DelegateError::new("bad token"));
        assert_eq!(err.to_string(), "simplify failed: bad token");

        let err = KeypadError::CapabilityMissing {
            capability: Operation::Expand,
        };
        assert!(err.to_string().contains("expand"));
    }

    #[test]
    fn test_config_error_from_json() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: KeypadError = parse.unwrap_err().into();
        assert!(matches!(err, KeypadError::Config(_)));
    }

    #[test]
    fn test_keypad_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(KeypadError::EmptyExpression);
        assert!(err.to_string().contains("Empty"));
    }
}
