//! Branching and boolean helpers.

use serde_json::Value;

use crate::error::Result;
use crate::value;

use super::FunctionTable;

pub(super) fn register(table: &mut FunctionTable) {
    table.insert("IF", if_fn);
    table.insert("COALESCE", coalesce);
    table.insert("AND", and);
    table.insert("OR", or);
    table.insert("NOT", not);
    table.insert("SWITCH", switch);
}

fn if_fn(args: &[Value]) -> Result<Value> {
    let cond = args.first().is_some_and(value::truthy);
    let picked = if cond { args.get(1) } else { args.get(2) };
    Ok(picked.cloned().unwrap_or(Value::Null))
}

fn coalesce(args: &[Value]) -> Result<Value> {
    Ok(args
        .iter()
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(Value::Null))
}

fn and(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args.iter().all(value::truthy)))
}

fn or(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args.iter().any(value::truthy)))
}

fn not(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(!args.first().is_some_and(value::truthy)))
}

/// `SWITCH(value, case1, result1, ..., default?)` compares with strict
/// equality and falls back to the trailing default, or `null` without one.
fn switch(args: &[Value]) -> Result<Value> {
    let Some(subject) = args.first() else {
        return Ok(Value::Null);
    };
    let mut pairs = args[1..].chunks_exact(2);
    for pair in pairs.by_ref() {
        if value::strict_eq(subject, &pair[0]) {
            return Ok(pair[1].clone());
        }
    }
    Ok(pairs.remainder().first().cloned().unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn if_picks_branch() {
        assert_eq!(if_fn(&[json!(true), json!("a"), json!("b")]).unwrap(), json!("a"));
        assert_eq!(if_fn(&[json!(0), json!("a"), json!("b")]).unwrap(), json!("b"));
        assert_eq!(if_fn(&[json!(false), json!("a")]).unwrap(), Value::Null);
    }

    #[test]
    fn coalesce_first_non_null() {
        assert_eq!(
            coalesce(&[Value::Null, json!(0), json!("x")]).unwrap(),
            json!(0)
        );
        assert_eq!(coalesce(&[Value::Null]).unwrap(), Value::Null);
    }

    #[test]
    fn and_or_not_truthiness() {
        assert_eq!(and(&[json!(1), json!("x")]).unwrap(), json!(true));
        assert_eq!(and(&[json!(1), json!("")]).unwrap(), json!(false));
        assert_eq!(or(&[json!(0), json!("")]).unwrap(), json!(false));
        assert_eq!(or(&[json!(0), json!(2)]).unwrap(), json!(true));
        assert_eq!(not(&[json!(0)]).unwrap(), json!(true));
    }

    #[test]
    fn switch_matches_and_defaults() {
        let args = [json!("b"), json!("a"), json!(1), json!("b"), json!(2), json!(99)];
        assert_eq!(switch(&args).unwrap(), json!(2));
        let args = [json!("z"), json!("a"), json!(1), json!(99)];
        assert_eq!(switch(&args).unwrap(), json!(99));
        let args = [json!("z"), json!("a"), json!(1)];
        assert_eq!(switch(&args).unwrap(), Value::Null);
    }
}
