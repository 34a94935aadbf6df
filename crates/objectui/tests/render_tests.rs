//! End-to-end tests across schema rendering, bindings, and widget loading.

use std::sync::Arc;

use objectui::prelude::*;
use serde_json::{Value, json};

fn standard_setup() -> (SchemaRenderer, ExpressionEngine, StandardContext) {
    let registry = Arc::new(ComponentRegistry::new());
    register_builtins(&registry);
    let renderer = SchemaRenderer::new(registry);
    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(
        ContextInput::new().with_data(json!({"name": "Ada", "amount": 1500})),
    );
    (renderer, engine, ctx)
}

#[test]
fn test_unknown_type_renders_diagnostic_not_failure() {
    let registry = Arc::new(ComponentRegistry::new());
    register_builtins(&registry);
    let renderer = SchemaRenderer::new(registry);

    // One bad child among good siblings only poisons its own subtree.
    let schema = SchemaNode::new("container")
        .with_child(SchemaNode::new("text").with_prop("text", json!("ok")))
        .with_child(SchemaNode::new("mystery-chart"))
        .with_child(SchemaNode::new("text").with_prop("text", json!("also ok")));

    let rendered = renderer.render(&schema);
    let children = rendered.children();
    assert_eq!(children[0], RenderNode::text("ok"));
    assert!(children[1].is_diagnostic());
    assert_eq!(children[2], RenderNode::text("also ok"));

    // The diagnostic carries the unresolved schema for inspection.
    let RenderNode::Diagnostic { message, schema } = &children[1] else {
        panic!("expected diagnostic");
    };
    assert!(message.contains("mystery-chart"));
    assert_eq!(schema.get("type"), Some(&json!("mystery-chart")));
}

#[test]
fn test_bindings_flow_into_rendered_output() {
    let (renderer, engine, ctx) = standard_setup();

    let schema = SchemaNode::new("text")
        .with_prop("text", json!("${data.name} owes ${FIXED(data.amount / 100, 2)}"));
    let bound = objectui::resolve_bindings(&schema, &engine, &ctx);

    assert_eq!(renderer.render(&bound), RenderNode::text("Ada owes 15.00"));
}

#[test]
fn test_visibility_gates_rendering() {
    let (renderer, engine, ctx) = standard_setup();

    let schema = SchemaNode::new("text")
        .with_prop("text", json!("secret"))
        .with_prop("visibleOn", json!("${data.amount > 9000}"));

    let rendered = if objectui::is_visible(&schema, &engine, &ctx) {
        renderer.render(&schema)
    } else {
        RenderNode::Empty
    };
    assert_eq!(rendered, RenderNode::Empty);
}

#[tokio::test]
async fn test_widget_load_feeds_the_component_registry() {
    fn badge(node: &SchemaNode, _ctx: &RenderContext<'_>) -> RenderNode {
        let label = node.get_str("label").unwrap_or("?").to_string();
        RenderNode::element("span")
            .with_attr("class", Value::String("badge".to_string()))
            .with_child(RenderNode::text(label))
    }

    let components = Arc::new(ComponentRegistry::new());
    register_builtins(&components);
    let widgets = WidgetRegistry::with_components(Arc::clone(&components));

    widgets.register(
        WidgetManifest::inline("badge-widget", "badge", badge)
            .with_label("Badge")
            .with_category("display"),
    );
    assert!(!components.contains("badge"));

    widgets.load("badge-widget").await.unwrap();
    assert!(components.contains("badge"));
    assert!(widgets.is_loaded("badge-widget"));

    // The loaded widget renders through the ordinary dispatch path.
    let renderer = SchemaRenderer::new(components);
    let schema = SchemaNode::new("container")
        .with_child(SchemaNode::new("badge").with_prop("label", json!("New")));
    let rendered = renderer.render(&schema);
    assert_eq!(
        rendered.children()[0],
        RenderNode::element("span")
            .with_attr("class", Value::String("badge".to_string()))
            .with_child(RenderNode::text("New"))
    );
}

#[tokio::test]
async fn test_dependency_chain_loads_before_dependent() {
    fn noop(_: &SchemaNode, _: &RenderContext<'_>) -> RenderNode {
        RenderNode::Empty
    }

    let components = Arc::new(ComponentRegistry::new());
    let widgets = WidgetRegistry::with_components(Arc::clone(&components));
    widgets.register(WidgetManifest::inline("base", "base-type", noop));
    widgets.register(
        WidgetManifest::inline("derived", "derived-type", noop).with_dependency("base"),
    );

    widgets.load("derived").await.unwrap();
    assert!(widgets.is_loaded("base"));
    assert!(widgets.is_loaded("derived"));
    assert!(components.contains("base-type"));
    assert!(components.contains("derived-type"));
}

#[test]
fn test_repeater_with_bound_items() {
    let (renderer, engine, _) = standard_setup();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({
        "rows": [{"label": "a"}, {"label": "b"}],
    })));

    let schema = SchemaNode::new("each")
        .with_prop("items", json!("${data.rows}"))
        .with_child(SchemaNode::new("text").with_prop("text", json!("row")));
    let bound = objectui::resolve_bindings(&schema, &engine, &ctx);

    let rendered = renderer.render(&bound);
    assert_eq!(rendered.children().len(), 2);
}
