//! String helpers.
//!
//! Non-string scalars are displayed the same way template interpolation
//! displays them, so `CONCAT('Total: ', 42)` reads naturally.

use serde_json::Value;

use crate::error::Result;
use crate::value;

use super::FunctionTable;

pub(super) fn register(table: &mut FunctionTable) {
    table.insert("UPPER", upper);
    table.insert("LOWER", lower);
    table.insert("TRIM", trim);
    table.insert("CONCAT", concat);
    table.insert("LEN", len);
    table.insert("SUBSTRING", substring);
    table.insert("CONTAINS", contains);
}

fn text(arg: Option<&Value>) -> String {
    arg.map(value::to_display).unwrap_or_default()
}

fn upper(args: &[Value]) -> Result<Value> {
    Ok(Value::String(text(args.first()).to_uppercase()))
}

fn lower(args: &[Value]) -> Result<Value> {
    Ok(Value::String(text(args.first()).to_lowercase()))
}

fn trim(args: &[Value]) -> Result<Value> {
    Ok(Value::String(text(args.first()).trim().to_string()))
}

fn concat(args: &[Value]) -> Result<Value> {
    let joined: String = args.iter().map(value::to_display).collect();
    Ok(Value::String(joined))
}

/// Length of a string (in characters) or an array.
fn len(args: &[Value]) -> Result<Value> {
    let length = match args.first() {
        Some(Value::Array(items)) => items.len(),
        Some(Value::String(s)) => s.chars().count(),
        other => text(other).chars().count(),
    };
    Ok(Value::from(length))
}

/// `SUBSTRING(s, start, end?)` with character indices; out-of-range bounds
/// clamp rather than fail.
fn substring(args: &[Value]) -> Result<Value> {
    let s = text(args.first());
    let chars: Vec<char> = s.chars().collect();
    let bound = |arg: Option<&Value>, default: usize| {
        arg.and_then(value::coerce_number)
            .map(|n| n.max(0.0) as usize)
            .unwrap_or(default)
            .min(chars.len())
    };
    let start = bound(args.get(1), 0);
    let end = bound(args.get(2), chars.len()).max(start);
    Ok(Value::String(chars[start..end].iter().collect()))
}

fn contains(args: &[Value]) -> Result<Value> {
    let haystack = text(args.first()).to_lowercase();
    let needle = text(args.get(1)).to_lowercase();
    Ok(Value::Bool(haystack.contains(&needle)))
}
