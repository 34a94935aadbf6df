//! Renders a small schema page against live data and prints the result tree.
//!
//! Log output is filtered per subsystem target; override the default filter
//! with e.g. `RUST_LOG=objectui_core::render=trace cargo run --example
//! render_demo`.

use std::sync::Arc;

use objectui::core::logging::{TreeFormatOptions, format_render_tree};
use objectui::{
    ComponentRegistry, ContextInput, ExpressionEngine, RenderNode, SchemaNode, SchemaRenderer,
    build_standard_context, is_visible, register_builtins, resolve_bindings,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("objectui=debug,objectui_core=debug")),
        )
        .init();

    let registry = Arc::new(ComponentRegistry::new());
    register_builtins(&registry);
    let renderer = SchemaRenderer::new(registry);

    let engine = ExpressionEngine::new();
    let ctx = build_standard_context(ContextInput::new().with_data(json!({
        "name": "Ada",
        "invoices": [
            {"number": "INV-1", "amount": 1200},
            {"number": "INV-2", "amount": 350},
        ],
    })));

    let sections = [
        SchemaNode::new("text").with_prop("text", json!("Hello ${data.name}")),
        SchemaNode::new("text")
            .with_prop("text", json!("Total: ${FIXED(SUM(data.invoices, 'amount'), 2)}")),
        SchemaNode::new("text")
            .with_prop("text", json!("Only shown for busy accounts"))
            .with_prop("visibleOn", json!("${data.invoices.length > 5}")),
        SchemaNode::new("mystery-widget"),
    ];

    let mut page = RenderNode::element("page");
    for section in &sections {
        if !is_visible(section, &engine, &ctx) {
            continue;
        }
        let bound = resolve_bindings(section, &engine, &ctx);
        page = page.with_child(renderer.render(&bound));
    }

    println!("{}", format_render_tree(&page, &TreeFormatOptions::default()));
}
