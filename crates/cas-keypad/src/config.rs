//! Controller configuration
//!
//! Display texts, error prefixes, the differentiation variable and the
//! startup delay. Loadable from JSON; every field has a default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KeypadResult, Operation};

/// Prefixes put in front of delegate failure text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPrefixes {
    /// Evaluation failures
    pub evaluate: String,
    /// Simplification failures
    pub simplify: String,
    /// Differentiation failures
    pub derivative: String,
    /// Expansion failures
    pub expand: String,
}

impl Default for ErrorPrefixes {
    fn default() -> Self {
        Self {
            evaluate: "Error: ".to_string(),
            simplify: "Simplify error: ".to_string(),
            derivative: "Derivative error: ".to_string(),
            expand: "Expand error: ".to_string(),
        }
    }
}

impl ErrorPrefixes {
    /// Returns the prefix for an operation
    #[must_use]
    pub fn for_operation(&self, operation: Operation) -> &str {
        match operation {
            Operation::Evaluate => &self.evaluate,
            Operation::Simplify => &self.simplify,
            Operation::Differentiate => &self.derivative,
            Operation::Expand => &self.expand,
        }
    }
}

/// Configuration for an [`InputController`](crate::controller::InputController)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypadConfig {
    /// Placeholder shown after `clear()`
    pub idle_message: String,
    /// Notice shown when evaluating a blank buffer
    pub empty_message: String,
    /// Message shown when the delegate cannot expand
    pub expand_unavailable_message: String,
    /// Prefix of the startup simplification result
    pub startup_prefix: String,
    /// Failure prefixes per operation
    pub error_prefixes: ErrorPrefixes,
    /// Variable that `differentiate()` differentiates with respect to
    pub derivative_variable: String,
    /// Delay before the startup simplification runs
    pub startup_delay_ms: u64,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            idle_message: "Waiting for input...".to_string(),
            empty_message: "Empty expression".to_string(),
            expand_unavailable_message: "Expand is not supported by the current math engine"
                .to_string(),
            startup_prefix: "Simplified: ".to_string(),
            error_prefixes: ErrorPrefixes::default(),
            derivative_variable: "x".to_string(),
            startup_delay_ms: 200,
        }
    }
}

impl KeypadConfig {
    /// Create a new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> KeypadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> KeypadResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the config as pretty JSON
    pub fn to_json(&self) -> KeypadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the differentiation variable
    #[must_use]
    pub fn with_derivative_variable(mut self, var: &str) -> Self {
        self.derivative_variable = var.to_string();
        self
    }

    /// Set the idle placeholder
    #[must_use]
    pub fn with_idle_message(mut self, message: &str) -> Self {
        self.idle_message = message.to_string();
        self
    }

    /// Set the startup delay
    #[must_use]
    pub fn with_startup_delay_ms(mut self, ms: u64) -> Self {
        self.startup_delay_ms = ms;
        self
    }

    /// Startup delay as a [`Duration`]
    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}
