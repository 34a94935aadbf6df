//! Expression bindings on schema props.
//!
//! Schema props carry `${...}` templates (`"title": "Hi ${data.name}"`) and
//! visibility conditions (`visibleOn`, `hiddenOn`). This module resolves
//! them against a standard context before a node is handed to its renderer.
//! Failures degrade: a template that cannot evaluate keeps its original
//! text, and a broken visibility condition leaves the node visible.

use objectui_core::SchemaNode;
use objectui_expr::{ExpressionEngine, StandardContext};
use serde_json::Value;

/// Prop keys that are never treated as templates.
const STRUCTURAL_KEYS: &[&str] = &["type", "body", "children", "visibleOn", "hiddenOn"];

/// Resolve every `${...}` template in a node's props.
///
/// Child schema nodes under `body`/`children` are left untouched — they are
/// resolved when their own render happens, against their own scope. Nested
/// non-child objects and arrays are walked recursively.
pub fn resolve_bindings(
    node: &SchemaNode,
    engine: &ExpressionEngine,
    ctx: &StandardContext,
) -> SchemaNode {
    let mut resolved = node.clone();
    let keys: Vec<String> = node
        .props()
        .keys()
        .filter(|k| !STRUCTURAL_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();
    for key in keys {
        if let Some(value) = node.get(&key) {
            let value = resolve_value(value, engine, ctx);
            resolved.set(key, value);
        }
    }
    resolved
}

fn resolve_value(value: &Value, engine: &ExpressionEngine, ctx: &StandardContext) -> Value {
    match value {
        Value::String(template) => match engine.evaluate_template(template, ctx) {
            Ok(resolved) => resolved,
            Err(error) => {
                tracing::debug!(
                    target: "objectui::binding",
                    template = %template,
                    %error,
                    "keeping unresolved template"
                );
                value.clone()
            }
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, engine, ctx))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, engine, ctx)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Decide whether a node should render, from its visibility props.
///
/// `visibleOn`/`hiddenOn` are expressions evaluated against the context;
/// `visible`/`hidden` are static booleans. An expression that fails to
/// evaluate counts as visible — graceful degradation over strict
/// correctness.
pub fn is_visible(node: &SchemaNode, engine: &ExpressionEngine, ctx: &StandardContext) -> bool {
    if node.get_bool("hidden").unwrap_or(false) {
        return false;
    }
    if let Some(false) = node.get_bool("visible") {
        return false;
    }
    if let Some(expr) = node.get_str("hiddenOn")
        && engine.evaluate_bool(strip_template(expr), ctx, false)
    {
        return false;
    }
    if let Some(expr) = node.get_str("visibleOn") {
        return engine.evaluate_bool(strip_template(expr), ctx, true);
    }
    true
}

/// Visibility expressions appear both bare (`data.x > 1`) and wrapped in a
/// single template placeholder (`${data.x > 1}`).
fn strip_template(expr: &str) -> &str {
    let trimmed = expr.trim();
    trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
        .unwrap_or(trimmed)
}
