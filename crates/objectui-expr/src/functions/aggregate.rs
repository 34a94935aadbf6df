//! Aggregation functions over record lists.

use serde_json::Value;

use crate::error::Result;
use crate::value;

use super::FunctionTable;

pub(super) fn register(table: &mut FunctionTable) {
    table.insert("SUM", sum);
    table.insert("AVG", avg);
    table.insert("MIN", min);
    table.insert("MAX", max);
    table.insert("COUNT", count);
}

/// Extract the numeric values to aggregate. Non-array input yields an empty
/// list; items missing the field or not coercible to a number are skipped.
fn numerics(args: &[Value]) -> Vec<f64> {
    let Some(Value::Array(items)) = args.first() else {
        return Vec::new();
    };
    let field = args.get(1).and_then(Value::as_str);
    items
        .iter()
        .filter_map(|item| match field {
            Some(field) => item.get(field).and_then(value::coerce_number),
            None => value::coerce_number(item),
        })
        .filter(|n| n.is_finite())
        .collect()
}

fn sum(args: &[Value]) -> Result<Value> {
    value::number(numerics(args).iter().sum())
}

fn avg(args: &[Value]) -> Result<Value> {
    let values = numerics(args);
    if values.is_empty() {
        return Ok(Value::from(0));
    }
    value::number(values.iter().sum::<f64>() / values.len() as f64)
}

fn min(args: &[Value]) -> Result<Value> {
    match numerics(args).into_iter().reduce(f64::min) {
        Some(n) => value::number(n),
        None => Ok(Value::Null),
    }
}

fn max(args: &[Value]) -> Result<Value> {
    match numerics(args).into_iter().reduce(f64::max) {
        Some(n) => value::number(n),
        None => Ok(Value::Null),
    }
}

/// `COUNT(items)` counts items; `COUNT(items, field)` counts items whose
/// `field` is present and non-null.
fn count(args: &[Value]) -> Result<Value> {
    let Some(Value::Array(items)) = args.first() else {
        return Ok(Value::from(0));
    };
    let counted = match args.get(1).and_then(Value::as_str) {
        Some(field) => items
            .iter()
            .filter(|item| !item.get(field).unwrap_or(&Value::Null).is_null())
            .count(),
        None => items.len(),
    };
    Ok(Value::from(counted))
}
