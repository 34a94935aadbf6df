//! Tests for the schema renderer dispatcher.

use std::sync::Arc;

use objectui_core::render::RenderContext;
use objectui_core::{ComponentRegistry, RenderNode, RenderScope, SchemaNode, SchemaRenderer};
use serde_json::{Value, json};

fn container(node: &SchemaNode, ctx: &RenderContext<'_>) -> RenderNode {
    RenderNode::element("container").with_children(ctx.render_children(node))
}

fn text(node: &SchemaNode, _ctx: &RenderContext<'_>) -> RenderNode {
    RenderNode::text(node.get_str("text").unwrap_or_default())
}

fn renderer_with_builtins() -> SchemaRenderer {
    let registry = Arc::new(ComponentRegistry::new());
    registry.register("container", container);
    registry.register("text", text);
    SchemaRenderer::new(registry)
}

#[test]
fn test_unknown_type_renders_diagnostic_with_schema() {
    let renderer = SchemaRenderer::new(Arc::new(ComponentRegistry::new()));
    let schema = SchemaNode::new("unknown-widget").with_prop("label", json!("hi"));

    let out = renderer.render(&schema);
    match out {
        RenderNode::Diagnostic { message, schema } => {
            assert!(message.contains("unknown-widget"));
            assert_eq!(schema["label"], json!("hi"));
        }
        other => panic!("expected diagnostic, got {other:?}"),
    }
}

#[test]
fn test_null_renders_empty_and_scalars_render_text() {
    let renderer = renderer_with_builtins();
    assert_eq!(renderer.render_value(&Value::Null), RenderNode::Empty);
    assert_eq!(renderer.render_value(&json!("plain")), RenderNode::text("plain"));
    assert_eq!(renderer.render_value(&json!(7)), RenderNode::text("7"));
}

#[test]
fn test_non_object_schema_renders_diagnostic() {
    let renderer = renderer_with_builtins();
    let out = renderer.render_value(&json!([1, 2, 3]));
    assert!(out.is_diagnostic());

    let out = renderer.render_value(&json!({"label": "no type"}));
    match out {
        RenderNode::Diagnostic { message, .. } => assert!(message.contains("type")),
        other => panic!("expected diagnostic, got {other:?}"),
    }
}

#[test]
fn test_children_render_recursively() {
    let renderer = renderer_with_builtins();
    let schema = json!({
        "type": "container",
        "body": [
            {"type": "text", "text": "one"},
            "bare string",
            {"type": "text", "text": "two"},
        ],
    });

    let out = renderer.render_value(&schema);
    assert_eq!(
        out.children(),
        &[
            RenderNode::text("one"),
            RenderNode::text("bare string"),
            RenderNode::text("two"),
        ]
    );
}

#[test]
fn test_failures_are_isolated_to_their_subtree() {
    let renderer = renderer_with_builtins();
    let schema = json!({
        "type": "container",
        "body": [
            {"type": "no-such-widget"},
            {"type": "text", "text": "still here"},
        ],
    });

    let out = renderer.render_value(&schema);
    assert!(out.children()[0].is_diagnostic());
    assert_eq!(out.children()[1], RenderNode::text("still here"));
    assert_eq!(out.diagnostics().len(), 1);
}

#[test]
fn test_scope_flows_to_descendants() {
    let registry = Arc::new(ComponentRegistry::new());
    registry.register("container", container);
    registry.register(
        "greeting",
        |_node: &SchemaNode, ctx: &RenderContext<'_>| -> RenderNode {
            let name = ctx
                .var("name")
                .and_then(Value::as_str)
                .unwrap_or("stranger");
            RenderNode::text(format!("hello {name}"))
        },
    );
    let renderer = SchemaRenderer::new(registry);

    let schema = SchemaNode::new("container").with_child(SchemaNode::new("greeting"));
    let scope = RenderScope::new().with_var("name", json!("ada"));

    let out = renderer.render_scoped(&schema, scope);
    assert_eq!(out.children(), &[RenderNode::text("hello ada")]);
}

#[test]
fn test_per_item_scope_override() {
    let registry = Arc::new(ComponentRegistry::new());
    registry.register(
        "list",
        |node: &SchemaNode, ctx: &RenderContext<'_>| -> RenderNode {
            let items = node
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let template = node.get("itemBody").cloned().unwrap_or(Value::Null);
            let children = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let scope = ctx
                        .scope()
                        .clone()
                        .with_var("item", item.clone())
                        .with_index(i);
                    ctx.render_child_scoped(&template, scope)
                })
                .collect::<Vec<_>>();
            RenderNode::element("list").with_children(children)
        },
    );
    registry.register(
        "item-label",
        |_node: &SchemaNode, ctx: &RenderContext<'_>| -> RenderNode {
            let label = ctx.var("item").and_then(Value::as_str).unwrap_or("?");
            RenderNode::text(format!("{}:{label}", ctx.index().unwrap_or(0)))
        },
    );
    let renderer = SchemaRenderer::new(registry);

    let schema = json!({
        "type": "list",
        "items": ["a", "b"],
        "itemBody": {"type": "item-label"},
    });
    let out = renderer.render_value(&schema);
    assert_eq!(
        out.children(),
        &[RenderNode::text("0:a"), RenderNode::text("1:b")]
    );
}

#[test]
fn test_depth_limit_degrades_to_diagnostic() {
    let registry = Arc::new(ComponentRegistry::new());
    registry.register(
        "recurse",
        |node: &SchemaNode, ctx: &RenderContext<'_>| -> RenderNode {
            // Renders itself forever without the guard.
            RenderNode::element("recurse").with_child(ctx.render_child(&node.to_value()))
        },
    );
    let renderer = SchemaRenderer::new(registry).with_max_depth(8);

    let out = renderer.render(&SchemaNode::new("recurse"));
    let diagnostics = out.diagnostics();
    assert_eq!(diagnostics.len(), 1);
}
