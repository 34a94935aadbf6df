//! End-to-end tests for the expression engine with the standard context.

use std::sync::Arc;

use objectui_expr::{ContextInput, ExpressionEngine, build_standard_context};
use serde_json::{Value, json};

#[test]
fn test_standard_context_aliasing_through_the_engine() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({"a": 1})));

    // data and record are the same allocation, not just equal values.
    assert!(Arc::ptr_eq(
        ctx.shared("data").unwrap(),
        ctx.shared("record").unwrap()
    ));
    assert_eq!(engine.evaluate("record.a === data.a", &ctx).unwrap(), json!(true));
    assert_eq!(engine.evaluate("form.a", &ctx).unwrap(), json!(1));
}

#[test]
fn test_evaluate_uses_the_cache() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({"n": 2})));

    assert_eq!(engine.evaluate("data.n * 10", &ctx).unwrap(), json!(20));
    assert_eq!(engine.evaluate("data.n * 10", &ctx).unwrap(), json!(20));

    let stats = engine.cache().stats();
    assert_eq!(stats.size, 1);
    assert_eq!(stats.total_hits, 2);
}

#[test]
fn test_template_single_placeholder_preserves_type() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(
        ContextInput::new().with_data(json!({"amount": 1500, "tags": ["a", "b"]})),
    );

    assert_eq!(
        engine.evaluate_template("${data.amount > 1000}", &ctx).unwrap(),
        json!(true)
    );
    assert_eq!(
        engine.evaluate_template("${data.tags}", &ctx).unwrap(),
        json!(["a", "b"])
    );
}

#[test]
fn test_template_interpolation_and_passthrough() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({"name": "Ada"})));

    assert_eq!(
        engine.evaluate_template("Hi ${data.name}!", &ctx).unwrap(),
        json!("Hi Ada!")
    );
    assert_eq!(
        engine.evaluate_template("no placeholders", &ctx).unwrap(),
        json!("no placeholders")
    );
    assert_eq!(engine.evaluate_template("", &ctx).unwrap(), json!(""));
}

#[test]
fn test_template_null_renders_empty() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({"a": null})));
    assert_eq!(
        engine.evaluate_template("x${data.a}y", &ctx).unwrap(),
        json!("xy")
    );
}

#[test]
fn test_evaluate_bool_defaults() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({"n": 5})));

    assert!(engine.evaluate_bool("data.n > 1", &ctx, false));
    assert!(!engine.evaluate_bool("data.n > 10", &ctx, true));
    // Broken expressions fall back instead of failing.
    assert!(engine.evaluate_bool("1 +", &ctx, true));
    assert!(!engine.evaluate_bool("no_such_var", &ctx, false));
}

#[test]
fn test_index_and_parent_variables() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(
        ContextInput::new()
            .with_data(json!({"id": 7}))
            .with_index(2)
            .with_parent(json!({"id": 1})),
    );

    assert_eq!(engine.evaluate("index", &ctx).unwrap(), json!(2));
    assert_eq!(engine.evaluate("parent.id", &ctx).unwrap(), json!(1));
}

#[test]
fn test_formula_properties_through_the_engine() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(
        ContextInput::new().with_data(json!({"items": [{"price": 10}, {"price": 20}]})),
    );

    assert_eq!(engine.evaluate("SUM([])", &ctx).unwrap(), json!(0));
    assert_eq!(engine.evaluate("SUM(null)", &ctx).unwrap(), json!(0));
    assert_eq!(engine.evaluate("SUM(data.missing)", &ctx).unwrap(), json!(0));
    assert_eq!(
        engine.evaluate("SUM(data.items, 'price')", &ctx).unwrap(),
        json!(30)
    );
    assert_eq!(
        engine.evaluate("PERCENT(0.8567, 1)", &ctx).unwrap(),
        json!("85.7%")
    );
    assert_eq!(
        engine.evaluate("FIXED(3.14159, 2)", &ctx).unwrap(),
        json!("3.14")
    );
}

#[test]
fn test_distinct_contexts_do_not_collide_in_cache() {
    let engine = ExpressionEngine::new();
    let plain = build_standard_context(ContextInput::new().with_data(json!({"n": 1})));
    let indexed = build_standard_context(
        ContextInput::new().with_data(json!({"n": 2})).with_index(0),
    );

    // The indexed context has an extra variable, so the same source compiles
    // to a second cache entry instead of being called with mismatched names.
    assert_eq!(engine.evaluate("data.n", &plain).unwrap(), json!(1));
    assert_eq!(engine.evaluate("data.n", &indexed).unwrap(), json!(2));
    assert_eq!(engine.cache().stats().size, 2);
}

#[test]
fn test_extras_are_visible_to_expressions() {
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(
        ContextInput::new().with_extra("theme", json!({"mode": "dark"})),
    );
    assert_eq!(
        engine.evaluate("theme.mode === 'dark'", &ctx).unwrap(),
        Value::Bool(true)
    );
}
