//! ObjectUI: a schema-driven UI rendering core.
//!
//! A UI is described as a tree of plain schema nodes (`{"type": "text",
//! "text": "Hi ${data.name}"}`); this workspace turns such trees into
//! rendered output without ever executing schema-supplied code:
//!
//! - [`objectui_core`] — schema nodes, the component registry, the widget
//!   registry with dependency-ordered loading, and the recursive schema
//!   renderer with diagnostic fallbacks.
//! - [`objectui_expr`] — the sandboxed expression language, formula function
//!   library, compiled-expression cache, and standard evaluation context.
//! - [`objectui_data`] — declarative data sources resolved through injected
//!   fetchers into one uniform result shape (behind the `data` feature, on
//!   by default).
//!
//! This crate adds the glue between them: expression bindings on schema
//! props ([`binding`]) and the built-in structural components ([`builtin`]).
//!
//! # Example
//!
//! ```
//! use objectui::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ComponentRegistry::new());
//! register_builtins(&registry);
//! let renderer = SchemaRenderer::new(registry);
//!
//! let engine = ExpressionEngine::new();
//! let ctx = build_standard_context(
//!     ContextInput::new().with_data(json!({"name": "Ada"})),
//! );
//!
//! let schema = SchemaNode::new("text").with_prop("text", json!("Hi ${data.name}"));
//! let bound = resolve_bindings(&schema, &engine, &ctx);
//! assert_eq!(renderer.render(&bound), RenderNode::text("Hi Ada"));
//! ```

pub mod binding;
pub mod builtin;
pub mod prelude;

pub use objectui_core as core;
#[cfg(feature = "data")]
pub use objectui_data as data;
pub use objectui_expr as expr;

pub use binding::{is_visible, resolve_bindings};
pub use builtin::register_builtins;
pub use objectui_core::{
    ComponentMeta, ComponentRegistry, ComponentRenderer, InputMeta, RenderContext, RenderNode,
    RenderScope, SchemaNode, SchemaRenderer, WidgetManifest, WidgetRegistry,
};
pub use objectui_expr::{
    ContextInput, ExpressionEngine, StandardContext, build_standard_context,
};
