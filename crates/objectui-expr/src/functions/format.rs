//! Display formatting functions.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::value;

use super::FunctionTable;

pub(super) fn register(table: &mut FunctionTable) {
    table.insert("FIXED", fixed);
    table.insert("PERCENT", percent);
}

fn numeric(function: &str, arg: Option<&Value>) -> Result<f64> {
    arg.and_then(value::coerce_number)
        .ok_or_else(|| Error::function(function, "expected a number"))
}

fn digits(arg: Option<&Value>, default: usize) -> usize {
    arg.and_then(value::coerce_number)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
        .unwrap_or(default)
        .min(12)
}

/// `FIXED(3.14159, 2)` is `"3.14"`. Digits default to 2.
fn fixed(args: &[Value]) -> Result<Value> {
    let x = numeric("FIXED", args.first())?;
    let digits = digits(args.get(1), 2);
    Ok(Value::String(format!("{x:.digits$}")))
}

/// `PERCENT(0.8567, 1)` is `"85.7%"`. The fraction is scaled by 100 and
/// digits default to 0.
fn percent(args: &[Value]) -> Result<Value> {
    let x = numeric("PERCENT", args.first())? * 100.0;
    let digits = digits(args.get(1), 0);
    Ok(Value::String(format!("{x:.digits$}%")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixed_formats_to_digits() {
        assert_eq!(fixed(&[json!(3.14159), json!(2)]).unwrap(), json!("3.14"));
        assert_eq!(fixed(&[json!(2.0)]).unwrap(), json!("2.00"));
    }

    #[test]
    fn percent_scales_the_fraction() {
        assert_eq!(percent(&[json!(0.8567), json!(1)]).unwrap(), json!("85.7%"));
        assert_eq!(percent(&[json!(0.5)]).unwrap(), json!("50%"));
    }

    #[test]
    fn percent_rejects_non_numbers() {
        assert!(percent(&[json!("abc")]).is_err());
    }
}
