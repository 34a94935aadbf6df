//! Declarative schema nodes.
//!
//! A [`SchemaNode`] is a plain data record with a required `type` discriminator
//! and an open set of additional properties. Nodes form a tree through the
//! `body` / `children` properties; ownership is purely structural, so a tree is
//! typically built once per render pass and discarded rather than mutated in
//! place.
//!
//! # Example
//!
//! ```
//! use objectui_core::SchemaNode;
//! use serde_json::json;
//!
//! let page = SchemaNode::new("page")
//!     .with_prop("title", json!("Dashboard"))
//!     .with_child(SchemaNode::new("text").with_prop("text", json!("Hello")));
//!
//! assert_eq!(page.node_type(), "page");
//! assert_eq!(page.children().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property keys that hold a node's child schema.
///
/// `body` is preferred; `children` is accepted as an alias so that schemas
/// authored against either convention resolve the same way.
pub const CHILD_KEYS: [&str; 2] = ["body", "children"];

/// A declarative schema node: a `type` tag plus an open property map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaNode {
    props: Map<String, Value>,
}

impl SchemaNode {
    /// Create a node with the given `type` discriminator and no other
    /// properties.
    pub fn new(node_type: impl Into<String>) -> Self {
        let mut props = Map::new();
        props.insert("type".to_string(), Value::String(node_type.into()));
        Self { props }
    }

    /// Interpret a JSON value as a schema node.
    ///
    /// Returns `None` when the value is not an object or its `type` property
    /// is missing or not a string. This is the validation point; the
    /// `Deserialize` impl is transparent and performs none.
    pub fn from_value(value: &Value) -> Option<Self> {
        let props = value.as_object()?;
        props.get("type")?.as_str()?;
        Some(Self {
            props: props.clone(),
        })
    }

    /// The node's `type` discriminator.
    ///
    /// Empty when the node was constructed through `Deserialize` without a
    /// `type` property; [`from_value`](Self::from_value) never produces such
    /// a node.
    pub fn node_type(&self) -> &str {
        self.props
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Get a property value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Get a property as a string slice, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Get a property as a bool, if it is a bool.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.props.get(key).and_then(Value::as_bool)
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.props.insert(key.into(), value);
    }

    /// Builder-style property assignment.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Append a child node to the `body` property, promoting an existing
    /// scalar or object body to an array as needed.
    #[must_use]
    pub fn with_child(mut self, child: SchemaNode) -> Self {
        let child = Value::Object(child.props);
        match self.props.get_mut("body") {
            Some(Value::Array(items)) => items.push(child),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, child]);
            }
            None => {
                self.props.insert("body".to_string(), child);
            }
        }
        self
    }

    /// The child schema nodes declared under `body` or `children`.
    ///
    /// Scalar children (bare strings rendered as text) are not schema nodes
    /// and are skipped here; renderers that need them should go through
    /// [`RenderContext::render_children`](crate::render::RenderContext::render_children),
    /// which handles both.
    pub fn children(&self) -> Vec<SchemaNode> {
        match self.child_value() {
            Some(Value::Array(items)) => items.iter().filter_map(SchemaNode::from_value).collect(),
            Some(value) => SchemaNode::from_value(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// The raw value of the first present child property (`body`, then
    /// `children`), if any.
    pub fn child_value(&self) -> Option<&Value> {
        CHILD_KEYS.iter().find_map(|key| self.props.get(*key))
    }

    /// The full property map.
    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    /// Mutable access to the property map.
    pub fn props_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.props
    }

    /// Convert the node back into a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.props.clone())
    }

    /// Consume the node, yielding its property map.
    pub fn into_props(self) -> Map<String, Value> {
        self.props
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        Value::Object(node.props)
    }
}
