//! Standard evaluation context.
//!
//! Every expression evaluates against the same namespace shape: `data`,
//! `record`, `form`, `user`, `page`, `params`, `env`, plus optional `index`
//! and `parent` and any caller extras. `record` is an alias of `data` — the
//! two names share one value — and `form` falls back to `data` when not
//! supplied separately.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::eval::VarScope;

/// Raw inputs for [`build_standard_context`].
#[derive(Debug, Clone, Default)]
pub struct ContextInput {
    /// Current record data.
    pub data: Option<Value>,
    /// Form state, defaulting to `data` when absent.
    pub form: Option<Value>,
    /// Current user.
    pub user: Option<Value>,
    /// Page-level state.
    pub page: Option<Value>,
    /// Route or invocation parameters.
    pub params: Option<Value>,
    /// Environment facts.
    pub env: Option<Value>,
    /// Position inside a repeating parent, when applicable.
    pub index: Option<u64>,
    /// Enclosing record, when applicable.
    pub parent: Option<Value>,
    /// Extra top-level variables; these override the standard names.
    pub extra: Map<String, Value>,
}

impl ContextInput {
    /// An empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `data` (and therefore `record`).
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set `form` explicitly instead of aliasing `data`.
    #[must_use]
    pub fn with_form(mut self, form: Value) -> Self {
        self.form = Some(form);
        self
    }

    /// Set `user`.
    #[must_use]
    pub fn with_user(mut self, user: Value) -> Self {
        self.user = Some(user);
        self
    }

    /// Set `page`.
    #[must_use]
    pub fn with_page(mut self, page: Value) -> Self {
        self.page = Some(page);
        self
    }

    /// Set `params`.
    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Set `env`.
    #[must_use]
    pub fn with_env(mut self, env: Value) -> Self {
        self.env = Some(env);
        self
    }

    /// Set the repeat `index`.
    #[must_use]
    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    /// Set `parent`.
    #[must_use]
    pub fn with_parent(mut self, parent: Value) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add an extra top-level variable.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

/// The assembled variable namespace.
///
/// Values are held behind [`Arc`] so aliased names (`data`/`record`) share
/// one allocation and so evaluation can hand out cheap clones.
#[derive(Debug, Clone, Default)]
pub struct StandardContext {
    vars: BTreeMap<String, Arc<Value>>,
}

impl StandardContext {
    /// Look up a variable, cloning the value out.
    pub fn var(&self, name: &str) -> Option<Value> {
        self.vars.get(name).map(|v| (**v).clone())
    }

    /// Look up a variable without cloning. `shared("data")` and
    /// `shared("record")` return the same allocation.
    pub fn shared(&self, name: &str) -> Option<&Arc<Value>> {
        self.vars.get(name)
    }

    /// Variable names in sorted order, matching the argument order of
    /// [`args`](Self::args).
    pub fn var_names(&self) -> Vec<String> {
        self.vars.keys().cloned().collect()
    }

    /// Values in the same order as [`var_names`](Self::var_names).
    pub fn args(&self) -> Vec<Value> {
        self.vars.values().map(|v| (**v).clone()).collect()
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), Arc::new(value));
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the context has no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl VarScope for StandardContext {
    fn var(&self, name: &str) -> Option<Value> {
        StandardContext::var(self, name)
    }
}

fn object_or_empty(value: Option<Value>) -> Arc<Value> {
    Arc::new(value.unwrap_or_else(|| Value::Object(Map::new())))
}

/// Assemble the standard namespace from raw inputs.
pub fn build_standard_context(input: ContextInput) -> StandardContext {
    let mut vars = BTreeMap::new();

    let data = object_or_empty(input.data);
    // record aliases data; form falls back to the same value.
    vars.insert("record".to_string(), Arc::clone(&data));
    let form = match input.form {
        Some(form) => Arc::new(form),
        None => Arc::clone(&data),
    };
    vars.insert("form".to_string(), form);
    vars.insert("data".to_string(), data);

    vars.insert("user".to_string(), object_or_empty(input.user));
    vars.insert("page".to_string(), object_or_empty(input.page));
    vars.insert("params".to_string(), object_or_empty(input.params));
    vars.insert("env".to_string(), object_or_empty(input.env));

    if let Some(index) = input.index {
        vars.insert("index".to_string(), Arc::new(Value::from(index)));
    }
    if let Some(parent) = input.parent {
        vars.insert("parent".to_string(), Arc::new(parent));
    }
    for (name, value) in input.extra {
        vars.insert(name, Arc::new(value));
    }

    StandardContext { vars }
}
