//! Core systems for ObjectUI.
//!
//! This crate provides the foundational components of the ObjectUI schema
//! rendering framework:
//!
//! - **Schema Model**: declarative schema nodes with a `type` discriminator
//! - **Component Registry**: type keys mapped to renderers plus metadata
//! - **Widget Registry**: lazily-loaded plugin widgets with dependency
//!   resolution, caching, and load events
//! - **Schema Renderer**: recursive dispatch from schema trees to a
//!   host-agnostic render output tree, with diagnostic fallbacks
//! - **Signals**: synchronous observer lists for registry notifications
//!
//! # Rendering Example
//!
//! ```
//! use std::sync::Arc;
//! use objectui_core::{ComponentRegistry, RenderNode, SchemaNode, SchemaRenderer};
//! use objectui_core::render::RenderContext;
//!
//! fn text(node: &SchemaNode, _ctx: &RenderContext<'_>) -> RenderNode {
//!     RenderNode::text(node.get_str("text").unwrap_or_default())
//! }
//!
//! let registry = Arc::new(ComponentRegistry::new());
//! registry.register("text", text);
//!
//! let renderer = SchemaRenderer::new(registry);
//! let out = renderer.render(&SchemaNode::new("text").with_prop("text", "hi".into()));
//! assert_eq!(out, RenderNode::text("hi"));
//! ```
//!
//! # Diagnostic Fallback
//!
//! Dispatching a schema type with no registered renderer produces a visible
//! diagnostic block instead of an error, so the rest of the tree still
//! renders:
//!
//! ```
//! use std::sync::Arc;
//! use objectui_core::{ComponentRegistry, SchemaNode, SchemaRenderer};
//!
//! let renderer = SchemaRenderer::new(Arc::new(ComponentRegistry::new()));
//! let out = renderer.render(&SchemaNode::new("unknown-widget"));
//! assert!(out.is_diagnostic());
//! ```

mod error;
pub mod events;
pub mod logging;
pub mod registry;
pub mod render;
pub mod schema;
pub mod widget;

pub use error::{WidgetError, WidgetResult};
pub use events::{ConnectionGuard, ConnectionId, Signal};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle, format_render_tree};
pub use registry::{ComponentMeta, ComponentRegistry, ComponentRenderer, InputMeta};
pub use render::{DEFAULT_MAX_DEPTH, RenderContext, RenderNode, RenderScope, SchemaRenderer};
pub use schema::SchemaNode;
pub use widget::{
    ResolvedWidget, WidgetEvent, WidgetManifest, WidgetRegistry, WidgetSource, WidgetStats,
};
