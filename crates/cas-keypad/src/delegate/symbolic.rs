//! Delegate backed by the `symb_anafis` computer-algebra crate
//!
//! The engine's parser closes dangling parentheses on its own and panics on
//! some empty function calls, so every expression is checked for balanced,
//! non-empty groups before it reaches the engine. `symb_anafis` has no
//! expansion, so this delegate reports the expand capability as missing.

use std::f64::consts::{E, PI};
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::{MathDelegate, Scope, Value};
use crate::error::DelegateError;

/// Constants the keypad emits, bound unless the scope shadows them
const CONSTANTS: [(&str, f64); 2] = [("pi", PI), ("e", E)];

/// [`MathDelegate`] wrapping `symb_anafis`
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicDelegate;

impl SymbolicDelegate {
    /// Creates the delegate
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a non-assignment expression against the numeric bindings
    fn evaluate_numeric(&self, expr: &str, scope: &Scope) -> Result<Value, DelegateError> {
        check_groups(expr)?;
        let mut bindings = scope.numeric_bindings();
        for (name, value) in CONSTANTS {
            if scope.get(name).is_none() {
                bindings.push((name, value));
            }
        }
        let reduced = guarded(|| symb_anafis::evaluate_str(expr, &bindings))?;
        to_number(reduced.trim())
    }
}

/// Runs an engine call, turning an engine panic into a delegate error
fn guarded<F>(call: F) -> Result<String, DelegateError>
where
    F: FnOnce() -> Result<String, symb_anafis::DiffError>,
{
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result.map_err(|e| DelegateError::new(e.to_string())),
        Err(_) => Err(DelegateError::new("Math engine could not process the expression")),
    }
}

/// Rejects unbalanced parentheses and empty groups such as `sin()`
fn check_groups(expr: &str) -> Result<(), DelegateError> {
    let mut depth = 0usize;
    let mut last = None;
    let mut position = 0;
    for (index, c) in expr.chars().enumerate() {
        position = index + 1;
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Err(DelegateError::new(format!(
                        "Unexpected ) (char {position})"
                    )));
                }
                if last == Some('(') {
                    return Err(DelegateError::new(format!(
                        "Value expected inside () (char {position})"
                    )));
                }
                depth -= 1;
            }
            _ => {}
        }
        if !c.is_whitespace() {
            last = Some(c);
        }
    }
    if depth > 0 {
        return Err(DelegateError::new(format!(
            "Parenthesis ) expected (char {})",
            position + 1
        )));
    }
    Ok(())
}

/// Reads the engine's reduced text as a finite number
fn to_number(reduced: &str) -> Result<Value, DelegateError> {
    if let Ok(n) = reduced.parse::<f64>() {
        return if n.is_nan() {
            Err(DelegateError::new("Result is not a real number"))
        } else if n.is_infinite() {
            Err(DelegateError::new("Result is infinite"))
        } else {
            Ok(Value::Number(n))
        };
    }
    let symbols = free_symbols(reduced);
    if symbols.is_empty() {
        Err(DelegateError::new(format!(
            "'{reduced}' has no finite value"
        )))
    } else {
        Err(DelegateError::new(format!(
            "Undefined symbol: {}",
            symbols.join(", ")
        )))
    }
}

/// Identifiers in `text` that are not function names or float specials
fn free_symbols(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut symbols: Vec<String> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() || c == '.' {
            i += 1;
            while i < chars.len() {
                let d = chars[i];
                let exponent = matches!(d, 'e' | 'E')
                    && chars
                        .get(i + 1)
                        .is_some_and(|n| n.is_ascii_digit() || matches!(*n, '+' | '-'));
                if d.is_ascii_digit() || d == '.' {
                    i += 1;
                } else if exponent {
                    i += 2;
                } else {
                    break;
                }
            }
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            let is_call = chars[i..].iter().find(|c| !c.is_whitespace()) == Some(&'(');
            if !is_call && !matches!(name.as_str(), "NaN" | "inf") && !symbols.contains(&name) {
                symbols.push(name);
            }
        } else {
            i += 1;
        }
    }
    symbols
}

/// Splits `name = rhs` when the left side is a bare identifier
fn split_assignment(expr: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = expr.split_once('=')?;
    // `==`, `<=`, `>=`, `!=` are comparisons
    if rhs.starts_with('=') || lhs.ends_with(['<', '>', '!']) {
        return None;
    }
    let name = lhs.trim();
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, rhs.trim()))
}

impl MathDelegate for SymbolicDelegate {
    fn evaluate(&self, expr: &str, scope: &mut Scope) -> Result<Value, DelegateError> {
        match split_assignment(expr) {
            Some((name, rhs)) => {
                let value = self.evaluate_numeric(rhs, scope)?;
                scope.assign(name, value.clone());
                Ok(value)
            }
            None => self.evaluate_numeric(expr, scope),
        }
    }

    fn simplify(&self, expr: &str) -> Result<String, DelegateError> {
        check_groups(expr)?;
        guarded(|| symb_anafis::simplify(expr, None, None))
    }

    fn derivative(&self, expr: &str, var: &str) -> Result<String, DelegateError> {
        check_groups(expr)?;
        guarded(|| symb_anafis::diff(expr, var, None, None))
    }
}
