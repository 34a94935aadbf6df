//! Numeric helpers.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::value;

use super::FunctionTable;

pub(super) fn register(table: &mut FunctionTable) {
    table.insert("ROUND", round);
    table.insert("FLOOR", floor);
    table.insert("CEIL", ceil);
    table.insert("ABS", abs);
    table.insert("POWER", power);
}

fn numeric(function: &str, arg: Option<&Value>) -> Result<f64> {
    arg.and_then(value::coerce_number)
        .ok_or_else(|| Error::function(function, "expected a number"))
}

fn digits(arg: Option<&Value>) -> u32 {
    arg.and_then(value::coerce_number)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0)
        .min(12)
}

/// Halves round toward positive infinity (`ROUND(-2.5)` is `-2`), matching
/// `Math.round` rather than `f64::round`.
fn round(args: &[Value]) -> Result<Value> {
    let x = numeric("ROUND", args.first())?;
    let scale = 10f64.powi(digits(args.get(1)) as i32);
    value::number((x * scale + 0.5).floor() / scale)
}

fn floor(args: &[Value]) -> Result<Value> {
    value::number(numeric("FLOOR", args.first())?.floor())
}

fn ceil(args: &[Value]) -> Result<Value> {
    value::number(numeric("CEIL", args.first())?.ceil())
}

fn abs(args: &[Value]) -> Result<Value> {
    value::number(numeric("ABS", args.first())?.abs())
}

fn power(args: &[Value]) -> Result<Value> {
    let base = numeric("POWER", args.first())?;
    let exp = numeric("POWER", args.get(1))?;
    value::number(base.powf(exp))
}
