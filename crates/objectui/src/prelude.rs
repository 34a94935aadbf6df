//! Prelude module for ObjectUI.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use objectui::prelude::*;
//! ```

// ============================================================================
// Schema and Rendering
// ============================================================================

pub use objectui_core::{
    ComponentMeta, ComponentRegistry, ComponentRenderer, InputMeta, RenderContext, RenderNode,
    RenderScope, SchemaNode, SchemaRenderer,
};

// ============================================================================
// Widget Loading
// ============================================================================

pub use objectui_core::{
    ResolvedWidget, WidgetError, WidgetEvent, WidgetManifest, WidgetRegistry, WidgetSource,
};

// ============================================================================
// Signals
// ============================================================================

pub use objectui_core::events::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Expressions and Context
// ============================================================================

pub use objectui_expr::{
    ContextInput, ExpressionCache, ExpressionEngine, FunctionTable, StandardContext,
    build_standard_context,
};

// ============================================================================
// Bindings and Built-ins
// ============================================================================

pub use crate::binding::{is_visible, resolve_bindings};
pub use crate::builtin::register_builtins;

// ============================================================================
// Data Resolution
// ============================================================================

#[cfg(feature = "data")]
pub use objectui_data::{
    DataSource, HttpUrlFetcher, ObjectQuery, RecordFetcher, UrlFetcher, ViewDataProvider,
    ViewDataResult,
};
