//! The schema renderer: recursive dispatch from schema nodes to render output.
//!
//! [`SchemaRenderer`] is the entry point of the rendering pipeline. Given a
//! schema node it looks up the node's `type` in the [`ComponentRegistry`],
//! invokes the renderer with a [`RenderContext`], and lets the renderer
//! resolve its own children lazily through the context. Unregistered types
//! render a [`RenderNode::Diagnostic`] block carrying the serialized schema,
//! so a local failure never unwinds past its subtree.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use objectui_core::{ComponentRegistry, RenderNode, SchemaNode, SchemaRenderer};
//! use objectui_core::render::RenderContext;
//!
//! fn container(node: &SchemaNode, ctx: &RenderContext<'_>) -> RenderNode {
//!     RenderNode::element("container").with_children(ctx.render_children(node))
//! }
//!
//! let registry = Arc::new(ComponentRegistry::new());
//! registry.register("container", container);
//!
//! let renderer = SchemaRenderer::new(registry);
//! let out = renderer.render(&SchemaNode::new("container"));
//! assert!(matches!(out, RenderNode::Element { .. }));
//! ```

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::registry::ComponentRegistry;
use crate::schema::SchemaNode;

/// Default recursion limit for [`SchemaRenderer`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Output of the rendering pipeline: a host-agnostic element tree.
///
/// The tree is serializable so hosts can hand it to whatever presentation
/// layer they drive (a DOM bridge, a TUI, a test assertion).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderNode {
    /// A rendered element with attributes and children.
    Element {
        /// Element tag, chosen by the renderer (not necessarily the schema type).
        tag: String,
        /// Attribute map.
        attrs: Map<String, Value>,
        /// Child output nodes.
        children: Vec<RenderNode>,
    },
    /// Plain text output.
    Text {
        /// The text content.
        text: String,
    },
    /// A visible diagnostic block replacing a subtree that could not render.
    Diagnostic {
        /// What went wrong.
        message: String,
        /// The offending schema, serialized for inspection.
        schema: Value,
    },
    /// Nothing to render.
    Empty,
}

impl RenderNode {
    /// Create an element with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs: Map::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a diagnostic node.
    pub fn diagnostic(message: impl Into<String>, schema: Value) -> Self {
        Self::Diagnostic {
            message: message.into(),
            schema,
        }
    }

    /// Set an attribute. No-op on non-element nodes.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.insert(key.into(), value);
        }
        self
    }

    /// Append a child. No-op on non-element nodes.
    #[must_use]
    pub fn with_child(mut self, child: RenderNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append children. No-op on non-element nodes.
    #[must_use]
    pub fn with_children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// The node's children, empty for non-element nodes.
    pub fn children(&self) -> &[RenderNode] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Whether this node is a diagnostic block.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Diagnostic { .. })
    }

    /// Collect every diagnostic in the subtree, depth-first.
    pub fn diagnostics(&self) -> Vec<&RenderNode> {
        let mut found = Vec::new();
        self.collect_diagnostics(&mut found);
        found
    }

    fn collect_diagnostics<'a>(&'a self, found: &mut Vec<&'a RenderNode>) {
        if self.is_diagnostic() {
            found.push(self);
        }
        for child in self.children() {
            child.collect_diagnostics(found);
        }
    }
}

/// Ambient state flowing into one renderer invocation.
///
/// The scope carries the data variables visible to the subtree, the item
/// index inside list-like renderers, and the designer flag. Scopes are cloned
/// per child, so a renderer's additions are visible to its descendants only.
#[derive(Debug, Clone, Default)]
pub struct RenderScope {
    /// Named data values visible to the subtree.
    pub vars: Map<String, Value>,
    /// Item index when rendering inside a list.
    pub index: Option<usize>,
    /// Whether rendering happens inside a designer surface.
    pub designer: bool,
}

impl RenderScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a data variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.vars.insert(name.into(), value);
        self
    }

    /// Set the item index.
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Mark the scope as a designer surface.
    #[must_use]
    pub fn designer(mut self) -> Self {
        self.designer = true;
        self
    }
}

/// Per-invocation rendering context handed to [`ComponentRenderer`]s.
///
/// Renderers use it to read the ambient scope and to recurse into child
/// schema lazily. The context borrows the dispatcher, so recursion re-enters
/// the same registry lookup path as the root render call.
///
/// [`ComponentRenderer`]: crate::registry::ComponentRenderer
pub struct RenderContext<'a> {
    renderer: &'a SchemaRenderer,
    scope: RenderScope,
    depth: usize,
}

impl RenderContext<'_> {
    /// Look up a data variable in the ambient scope.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.scope.vars.get(name)
    }

    /// The ambient scope.
    pub fn scope(&self) -> &RenderScope {
        &self.scope
    }

    /// The item index, when rendering inside a list.
    pub fn index(&self) -> Option<usize> {
        self.scope.index
    }

    /// Whether rendering happens inside a designer surface.
    pub fn is_designer(&self) -> bool {
        self.scope.designer
    }

    /// Current recursion depth (the root render is depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render a child schema value with the current scope.
    ///
    /// Strings and other scalars render as text; objects dispatch through the
    /// registry; `null` renders nothing.
    pub fn render_child(&self, value: &Value) -> RenderNode {
        self.render_child_scoped(value, self.scope.clone())
    }

    /// Render a child schema value with an explicit scope, for renderers that
    /// narrow the data scope per item (lists, kanban lanes).
    pub fn render_child_scoped(&self, value: &Value, scope: RenderScope) -> RenderNode {
        self.renderer.dispatch(value, scope, self.depth + 1)
    }

    /// Render the node's declared children (`body` / `children`).
    pub fn render_children(&self, node: &SchemaNode) -> Vec<RenderNode> {
        match node.child_value() {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(|v| self.render_child(v)).collect(),
            Some(value) => vec![self.render_child(value)],
        }
    }
}

/// The recursive schema-to-output dispatcher.
///
/// Dispatch is synchronous per node; renderers that need asynchronous data
/// fetch it themselves (through the view data provider) and render a loading
/// or error state in the meantime.
pub struct SchemaRenderer {
    registry: Arc<ComponentRegistry>,
    max_depth: usize,
}

impl SchemaRenderer {
    /// Create a renderer dispatching into the given registry.
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the recursion limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The registry this renderer dispatches into.
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Render a schema node with an empty scope.
    pub fn render(&self, node: &SchemaNode) -> RenderNode {
        self.render_scoped(node, RenderScope::new())
    }

    /// Render a schema node with an explicit root scope.
    pub fn render_scoped(&self, node: &SchemaNode, scope: RenderScope) -> RenderNode {
        self.dispatch(&node.to_value(), scope, 0)
    }

    /// Render a raw JSON value as schema.
    ///
    /// `null` renders [`RenderNode::Empty`]; strings and other scalars render
    /// as text; non-node objects render a diagnostic.
    pub fn render_value(&self, value: &Value) -> RenderNode {
        self.dispatch(value, RenderScope::new(), 0)
    }

    fn dispatch(&self, value: &Value, scope: RenderScope, depth: usize) -> RenderNode {
        if depth > self.max_depth {
            tracing::warn!(
                target: "objectui_core::render",
                depth,
                "render depth limit exceeded"
            );
            return RenderNode::diagnostic(
                format!("render depth limit of {} exceeded", self.max_depth),
                value.clone(),
            );
        }

        let props = match value {
            Value::Null => return RenderNode::Empty,
            Value::String(text) => return RenderNode::text(text.clone()),
            Value::Number(n) => return RenderNode::text(n.to_string()),
            Value::Bool(b) => return RenderNode::text(b.to_string()),
            Value::Object(props) => props,
            Value::Array(_) => {
                return RenderNode::diagnostic("schema node must be an object", value.clone());
            }
        };

        let Some(node_type) = props.get("type").and_then(Value::as_str) else {
            return RenderNode::diagnostic("schema node is missing a 'type'", value.clone());
        };

        let Some(renderer) = self.registry.get(node_type) else {
            tracing::debug!(
                target: "objectui_core::render",
                node_type,
                "no renderer registered; emitting fallback"
            );
            return RenderNode::diagnostic(
                format!("no renderer registered for type '{node_type}'"),
                value.clone(),
            );
        };

        let node = SchemaNode::from_value(value).unwrap_or_default();
        let ctx = RenderContext {
            renderer: self,
            scope,
            depth,
        };
        renderer.render(&node, &ctx)
    }
}

impl std::fmt::Debug for SchemaRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRenderer")
            .field("registry", &self.registry)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
