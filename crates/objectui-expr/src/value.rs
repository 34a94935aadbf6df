//! Value coercion semantics for expression evaluation.
//!
//! Expressions operate on `serde_json::Value` with the loose, JavaScript-
//! flavoured coercions the schema authors of the original runtime rely on:
//! `"" / 0 / false / null` are falsy, `+` concatenates when either operand is
//! a string, and loose equality coerces numbers and strings toward each
//! other. Strict equality (`===`) compares kind and value without coercion.

use serde_json::Value;

use crate::error::{Error, Result};

/// JavaScript-style truthiness.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// JavaScript `Number()` coercion. Returns `None` where JS would produce
/// `NaN` (non-numeric strings, arrays, objects).
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convert a float back into a JSON number, preferring integer representation
/// for whole values so rendered output stays clean.
pub fn number(f: f64) -> Result<Value> {
    if !f.is_finite() {
        return Err(Error::eval("non-finite numeric result"));
    }
    const SAFE: f64 = 9_007_199_254_740_992.0; // 2^53
    if f.fract() == 0.0 && f.abs() < SAFE {
        Ok(Value::from(f as i64))
    } else {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| Error::eval("non-finite numeric result"))
    }
}

/// String rendering used by templates and `CONCAT`.
///
/// `null` renders empty (matching how missing data is displayed), scalars
/// render plainly, and composites render as compact JSON.
pub fn to_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Strict equality: same kind, same value. Numbers compare by numeric value
/// regardless of integer/float representation.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Loose equality: numbers and strings coerce toward each other, booleans
/// coerce to numbers. Composites compare structurally.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(_), Value::String(_))
        | (Value::String(_), Value::Number(_))
        | (Value::Bool(_), _)
        | (_, Value::Bool(_)) => match (coerce_number(a), coerce_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        _ => strict_eq(a, b),
    }
}

/// Relational comparison. Two strings compare lexicographically; anything
/// else compares numerically after coercion.
pub fn compare(a: &Value, b: &Value) -> Result<std::cmp::Ordering> {
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Ok(x.cmp(y));
    }
    let (Some(x), Some(y)) = (coerce_number(a), coerce_number(b)) else {
        return Err(Error::eval(format!(
            "cannot compare {} with {}",
            kind(a),
            kind(b)
        )));
    };
    x.partial_cmp(&y)
        .ok_or_else(|| Error::eval("cannot compare non-finite numbers"))
}

/// Addition: string concatenation when either operand is a string, numeric
/// addition otherwise.
pub fn add(a: &Value, b: &Value) -> Result<Value> {
    if a.is_string() || b.is_string() {
        return Ok(Value::String(format!("{}{}", to_display(a), to_display(b))));
    }
    let (Some(x), Some(y)) = (coerce_number(a), coerce_number(b)) else {
        return Err(Error::eval(format!(
            "cannot add {} and {}",
            kind(a),
            kind(b)
        )));
    };
    number(x + y)
}

/// Human-readable value kind, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_js() {
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(false)));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!("0")));
    }

    #[test]
    fn loose_and_strict_equality() {
        assert!(loose_eq(&json!(1), &json!("1")));
        assert!(!strict_eq(&json!(1), &json!("1")));
        assert!(strict_eq(&json!(1), &json!(1.0)));
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(!loose_eq(&Value::Null, &json!(0)));
    }

    #[test]
    fn add_concatenates_with_strings() {
        assert_eq!(add(&json!("a"), &json!(1)).unwrap(), json!("a1"));
        assert_eq!(add(&json!(1), &json!(2)).unwrap(), json!(3));
    }

    #[test]
    fn number_prefers_integers() {
        assert_eq!(number(3.0).unwrap(), json!(3));
        assert_eq!(number(3.5).unwrap(), json!(3.5));
        assert!(number(f64::INFINITY).is_err());
    }
}
