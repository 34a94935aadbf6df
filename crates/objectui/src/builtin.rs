//! Built-in structural components.
//!
//! Real component libraries register their own renderers; the core ships only
//! the structural pieces every schema uses: a container, a text leaf, and a
//! repeater. They double as reference implementations of the renderer
//! contract.

use objectui_core::{
    ComponentMeta, ComponentRegistry, InputMeta, RenderContext, RenderNode, RenderScope,
    SchemaNode,
};
use serde_json::Value;

/// Register the built-in components into a registry.
pub fn register_builtins(registry: &ComponentRegistry) {
    registry.register_with_meta(
        "container",
        render_container,
        ComponentMeta::new("Container")
            .with_category("layout")
            .with_input(InputMeta::new("body", "Children", "schema")),
    );
    registry.register_with_meta(
        "text",
        render_text,
        ComponentMeta::new("Text")
            .with_category("display")
            .with_input(InputMeta::new("text", "Text", "string")),
    );
    registry.register_with_meta(
        "each",
        render_each,
        ComponentMeta::new("Repeat")
            .with_category("layout")
            .with_input(InputMeta::new("items", "Items", "array").required())
            .with_input(InputMeta::new("body", "Item template", "schema")),
    );
}

/// `container`: a grouping element rendering its children in order.
fn render_container(node: &SchemaNode, ctx: &RenderContext<'_>) -> RenderNode {
    let mut element = RenderNode::element("div");
    if let Some(class) = node.get_str("className") {
        element = element.with_attr("class", Value::String(class.to_string()));
    }
    element.with_children(ctx.render_children(node))
}

/// `text`: a leaf displaying its `text` (or legacy `value`) prop.
fn render_text(node: &SchemaNode, _ctx: &RenderContext<'_>) -> RenderNode {
    let text = node
        .get("text")
        .or_else(|| node.get("value"))
        .map(display)
        .unwrap_or_default();
    RenderNode::text(text)
}

/// `each`: renders its body once per item, with `item` and the index bound
/// into the child scope.
fn render_each(node: &SchemaNode, ctx: &RenderContext<'_>) -> RenderNode {
    let Some(Value::Array(items)) = node.get("items") else {
        return RenderNode::element("div");
    };
    let Some(body) = node.child_value().cloned() else {
        return RenderNode::element("div");
    };
    let children = items.iter().enumerate().map(|(index, item)| {
        let scope = ctx
            .scope()
            .clone()
            .with_var("item", item.clone())
            .with_index(index);
        ctx.render_child_scoped(&body, scope)
    });
    RenderNode::element("div").with_children(children)
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => composite.to_string(),
    }
}
