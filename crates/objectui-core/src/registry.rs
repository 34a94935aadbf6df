//! The component registry: string type keys mapped to renderers.
//!
//! A [`ComponentRegistry`] is an explicitly constructed, dependency-injected
//! store — there is no process-wide singleton. Re-registration under an
//! existing key overwrites the previous entry (last write wins), which is the
//! mechanism plugins use to override built-in renderers.
//!
//! # Example
//!
//! ```
//! use objectui_core::{ComponentMeta, ComponentRegistry, RenderNode, SchemaNode};
//! use objectui_core::render::RenderContext;
//!
//! fn text_renderer(node: &SchemaNode, _ctx: &RenderContext<'_>) -> RenderNode {
//!     RenderNode::text(node.get_str("text").unwrap_or_default())
//! }
//!
//! let registry = ComponentRegistry::new();
//! registry.register_with_meta(
//!     "text",
//!     text_renderer,
//!     ComponentMeta::new("Text").with_category("display"),
//! );
//!
//! assert!(registry.contains("text"));
//! assert!(registry.unregister("text"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::render::{RenderContext, RenderNode};
use crate::schema::SchemaNode;

/// A renderer turns a schema node into render output.
///
/// The registry treats renderers as opaque: no validation is performed at
/// registration time. Closures of the matching shape implement this trait
/// automatically.
pub trait ComponentRenderer: Send + Sync {
    /// Render one schema node. Children are resolved lazily through the
    /// context as the renderer decides to render them.
    fn render(&self, node: &SchemaNode, ctx: &RenderContext<'_>) -> RenderNode;
}

impl<F> ComponentRenderer for F
where
    F: Fn(&SchemaNode, &RenderContext<'_>) -> RenderNode + Send + Sync,
{
    fn render(&self, node: &SchemaNode, ctx: &RenderContext<'_>) -> RenderNode {
        self(node, ctx)
    }
}

/// Declared input of a component, for designers and form builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMeta {
    /// Property name on the schema node.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Input value kind (free-form, e.g. `"string"`, `"expression"`).
    #[serde(rename = "type")]
    pub input_type: String,
    /// Whether the input must be present.
    #[serde(default)]
    pub required: bool,
}

impl InputMeta {
    /// Create an input description.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        input_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            input_type: input_type.into(),
            required: false,
        }
    }

    /// Mark the input as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Metadata attached to a registry entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMeta {
    /// Human-readable label.
    pub label: String,
    /// Namespace of the registering plugin, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Palette category, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Declared inputs.
    #[serde(default)]
    pub inputs: Vec<InputMeta>,
    /// Props merged into new instances of the component.
    #[serde(default)]
    pub default_props: Map<String, Value>,
    /// Children given to new instances of the component.
    #[serde(default)]
    pub default_children: Vec<SchemaNode>,
}

impl ComponentMeta {
    /// Create metadata with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a declared input.
    #[must_use]
    pub fn with_input(mut self, input: InputMeta) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add a default prop.
    #[must_use]
    pub fn with_default_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.default_props.insert(key.into(), value);
        self
    }

    /// Add a default child.
    #[must_use]
    pub fn with_default_child(mut self, child: SchemaNode) -> Self {
        self.default_children.push(child);
        self
    }
}

struct RegistryEntry {
    renderer: Arc<dyn ComponentRenderer>,
    meta: ComponentMeta,
}

/// Mapping from schema `type` keys to renderers plus metadata.
///
/// Interior-mutable and `Send + Sync`; mutation is last-write-wins with no
/// transaction boundary between a lookup and a concurrent re-registration.
#[derive(Default)]
pub struct ComponentRegistry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer under a type key with default metadata.
    pub fn register<R>(&self, key: impl Into<String>, renderer: R)
    where
        R: ComponentRenderer + 'static,
    {
        self.register_with_meta(key, renderer, ComponentMeta::default());
    }

    /// Register a renderer with explicit metadata.
    pub fn register_with_meta<R>(&self, key: impl Into<String>, renderer: R, meta: ComponentMeta)
    where
        R: ComponentRenderer + 'static,
    {
        self.register_arc(key, Arc::new(renderer), meta);
    }

    /// Register an already-shared renderer. Used by the widget registry when
    /// syncing loaded widgets into the component registry.
    pub fn register_arc(
        &self,
        key: impl Into<String>,
        renderer: Arc<dyn ComponentRenderer>,
        meta: ComponentMeta,
    ) {
        let key = key.into();
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            tracing::debug!(
                target: "objectui_core::registry",
                %key,
                "overwriting component registration"
            );
        } else {
            tracing::trace!(target: "objectui_core::registry", %key, "registered component");
        }
        entries.insert(key, RegistryEntry { renderer, meta });
    }

    /// Look up the renderer for a type key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn ComponentRenderer>> {
        self.entries.read().get(key).map(|e| e.renderer.clone())
    }

    /// Look up the metadata for a type key.
    pub fn meta(&self, key: &str) -> Option<ComponentMeta> {
        self.entries.read().get(key).map(|e| e.meta.clone())
    }

    /// Whether a type key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Remove an entry. Returns `true` if one existed.
    pub fn unregister(&self, key: &str) -> bool {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            tracing::trace!(target: "objectui_core::registry", %key, "unregistered component");
        }
        removed
    }

    /// All registered type keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("len", &self.len())
            .finish()
    }
}
