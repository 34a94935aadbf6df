//! Date and time functions, built on chrono.
//!
//! Date arguments accept `YYYY-MM-DD` strings or full RFC 3339 timestamps.
//! `TODAY` and `NOW` read the system clock in UTC.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{Error, Result};

use super::FunctionTable;

pub(super) fn register(table: &mut FunctionTable) {
    table.insert("TODAY", today);
    table.insert("NOW", now);
    table.insert("YEAR", year);
    table.insert("MONTH", month);
    table.insert("DAY", day);
    table.insert("DATEDIFF", datediff);
    table.insert("DATEADD", dateadd);
}

fn parse_date(function: &str, arg: Option<&Value>) -> Result<NaiveDate> {
    let Some(Value::String(text)) = arg else {
        return Err(Error::function(function, "expected a date string"));
    };
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.date_naive())
        .map_err(|_| Error::function(function, format!("invalid date '{text}'")))
}

fn today(_args: &[Value]) -> Result<Value> {
    Ok(Value::String(Utc::now().format("%Y-%m-%d").to_string()))
}

fn now(_args: &[Value]) -> Result<Value> {
    Ok(Value::String(Utc::now().to_rfc3339()))
}

fn year(args: &[Value]) -> Result<Value> {
    use chrono::Datelike;
    Ok(Value::from(parse_date("YEAR", args.first())?.year()))
}

fn month(args: &[Value]) -> Result<Value> {
    use chrono::Datelike;
    Ok(Value::from(parse_date("MONTH", args.first())?.month()))
}

fn day(args: &[Value]) -> Result<Value> {
    use chrono::Datelike;
    Ok(Value::from(parse_date("DAY", args.first())?.day()))
}

/// Whole days from `a` to `b`: `DATEDIFF('2024-01-01', '2024-01-31')` is 30.
fn datediff(args: &[Value]) -> Result<Value> {
    let a = parse_date("DATEDIFF", args.first())?;
    let b = parse_date("DATEDIFF", args.get(1))?;
    Ok(Value::from((b - a).num_days()))
}

fn dateadd(args: &[Value]) -> Result<Value> {
    let date = parse_date("DATEADD", args.first())?;
    let days = args
        .get(1)
        .and_then(crate::value::coerce_number)
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .ok_or_else(|| Error::function("DATEADD", "expected a whole number of days"))?;
    let shifted = date
        .checked_add_signed(Duration::days(days as i64))
        .ok_or_else(|| Error::function("DATEADD", "date out of range"))?;
    Ok(Value::String(shifted.format("%Y-%m-%d").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_parts() {
        assert_eq!(year(&[json!("2024-03-09")]).unwrap(), json!(2024));
        assert_eq!(month(&[json!("2024-03-09")]).unwrap(), json!(3));
        assert_eq!(day(&[json!("2024-03-09")]).unwrap(), json!(9));
    }

    #[test]
    fn accepts_rfc3339_timestamps() {
        assert_eq!(year(&[json!("2024-03-09T12:30:00Z")]).unwrap(), json!(2024));
    }

    #[test]
    fn datediff_in_days() {
        let diff = datediff(&[json!("2024-01-01"), json!("2024-01-31")]).unwrap();
        assert_eq!(diff, json!(30));
    }

    #[test]
    fn dateadd_shifts_forward_and_back() {
        assert_eq!(
            dateadd(&[json!("2024-01-30"), json!(3)]).unwrap(),
            json!("2024-02-02")
        );
        assert_eq!(
            dateadd(&[json!("2024-01-01"), json!(-1)]).unwrap(),
            json!("2023-12-31")
        );
    }

    #[test]
    fn today_is_iso_date() {
        let Value::String(s) = today(&[]).unwrap() else {
            panic!("expected string");
        };
        assert_eq!(s.len(), 10);
        assert_eq!(&s[4..5], "-");
    }

    #[test]
    fn invalid_date_is_an_error() {
        assert!(year(&[json!("not a date")]).is_err());
        assert!(year(&[json!(42)]).is_err());
    }
}
