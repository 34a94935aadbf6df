//! The widget registry: lazily-resolved plugin components.
//!
//! A widget is a component that arrives as a plugin: a [`WidgetManifest`]
//! describing name, version, dependencies, and a source — either an inline
//! renderer or a reference into a [`ComponentRegistry`]. Manifests are
//! registered up front and materialized on demand by [`WidgetRegistry::load`],
//! which resolves dependencies recursively (and detects cycles), caches the
//! result, and optionally syncs the component into the component registry
//! under the widget's declared type.
//!
//! Registration, loading, and failures are announced synchronously on the
//! registry's [`Signal`] as [`WidgetEvent`]s.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use objectui_core::{ComponentRegistry, RenderNode, SchemaNode, WidgetManifest, WidgetRegistry};
//! use objectui_core::render::RenderContext;
//!
//! fn badge(_node: &SchemaNode, _ctx: &RenderContext<'_>) -> RenderNode {
//!     RenderNode::element("badge")
//! }
//!
//! # async fn demo() -> objectui_core::WidgetResult<()> {
//! let components = Arc::new(ComponentRegistry::new());
//! let widgets = WidgetRegistry::with_components(components.clone());
//!
//! widgets.register(WidgetManifest::inline("badge-widget", "badge", badge));
//! widgets.load("badge-widget").await?;
//!
//! assert!(widgets.is_loaded("badge-widget"));
//! assert!(components.contains("badge"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use serde::Serialize;

use crate::error::{WidgetError, WidgetResult};
use crate::events::Signal;
use crate::registry::{ComponentMeta, ComponentRegistry, ComponentRenderer};

/// Where a widget's component comes from.
#[derive(Clone)]
pub enum WidgetSource {
    /// The component is embedded in the manifest.
    Inline(Arc<dyn ComponentRenderer>),
    /// The component is looked up in the attached component registry.
    Registry {
        /// Key into the component registry.
        key: String,
    },
}

impl fmt::Debug for WidgetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("Inline(..)"),
            Self::Registry { key } => f.debug_struct("Registry").field("key", key).finish(),
        }
    }
}

/// Metadata describing a lazily-resolvable widget.
#[derive(Debug, Clone)]
pub struct WidgetManifest {
    /// Unique widget name within one registry.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Schema `type` the widget renders; also the component registry key it
    /// syncs to once loaded.
    pub widget_type: String,
    /// Human-readable label.
    pub label: String,
    /// Palette category, if any.
    pub category: Option<String>,
    /// Names of widgets that must load before this one.
    pub dependencies: Vec<String>,
    /// How to obtain the component.
    pub source: WidgetSource,
}

impl WidgetManifest {
    /// Create a manifest with an inline component.
    pub fn inline<R>(name: impl Into<String>, widget_type: impl Into<String>, renderer: R) -> Self
    where
        R: ComponentRenderer + 'static,
    {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            version: "0.1.0".to_string(),
            widget_type: widget_type.into(),
            category: None,
            dependencies: Vec::new(),
            source: WidgetSource::Inline(Arc::new(renderer)),
        }
    }

    /// Create a manifest whose component is resolved from the component
    /// registry under `key`.
    pub fn from_registry(
        name: impl Into<String>,
        widget_type: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            version: "0.1.0".to_string(),
            widget_type: widget_type.into(),
            category: None,
            dependencies: Vec::new(),
            source: WidgetSource::Registry { key: key.into() },
        }
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a dependency.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }
}

/// A widget whose component has been materialized.
#[derive(Clone)]
pub struct ResolvedWidget {
    /// The manifest the widget was loaded from.
    pub manifest: WidgetManifest,
    /// The materialized component.
    pub component: Arc<dyn ComponentRenderer>,
    /// When the widget was materialized.
    pub loaded_at: DateTime<Utc>,
}

impl fmt::Debug for ResolvedWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedWidget")
            .field("manifest", &self.manifest)
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

/// Notifications emitted by a [`WidgetRegistry`].
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// A manifest was registered.
    Registered {
        /// The widget name.
        name: String,
    },
    /// A manifest was removed.
    Unregistered {
        /// The widget name.
        name: String,
    },
    /// A widget finished loading.
    Loaded {
        /// The widget name.
        name: String,
    },
    /// A widget failed to load.
    LoadFailed {
        /// The widget name.
        name: String,
        /// Why the load failed.
        message: String,
    },
}

/// Counts reported by [`WidgetRegistry::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetStats {
    /// Number of registered manifests.
    pub registered: usize,
    /// Number of loaded widgets.
    pub loaded: usize,
    /// Distinct categories across registered manifests, sorted.
    pub categories: Vec<String>,
}

/// Registry of widget manifests with on-demand, dependency-ordered loading.
pub struct WidgetRegistry {
    manifests: RwLock<HashMap<String, WidgetManifest>>,
    resolved: RwLock<HashMap<String, Arc<ResolvedWidget>>>,
    components: Option<Arc<ComponentRegistry>>,
    events: Signal<WidgetEvent>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    /// Create a registry with no component registry attached.
    ///
    /// `Registry`-sourced widgets will fail to load, and loaded widgets are
    /// not synced anywhere.
    pub fn new() -> Self {
        Self {
            manifests: RwLock::new(HashMap::new()),
            resolved: RwLock::new(HashMap::new()),
            components: None,
            events: Signal::new(),
        }
    }

    /// Create a registry that resolves `Registry` sources from, and syncs
    /// loaded widgets into, the given component registry.
    pub fn with_components(components: Arc<ComponentRegistry>) -> Self {
        Self {
            components: Some(components),
            ..Self::new()
        }
    }

    /// The event signal. Subscribers receive notifications synchronously at
    /// the point of the state change.
    pub fn events(&self) -> &Signal<WidgetEvent> {
        &self.events
    }

    /// Register a manifest without loading it.
    ///
    /// Re-registration under an existing name overwrites the manifest and
    /// discards any previously resolved component for it.
    pub fn register(&self, manifest: WidgetManifest) {
        let name = manifest.name.clone();
        tracing::trace!(target: "objectui_core::widget", widget = %name, "registered widget manifest");
        self.manifests.write().insert(name.clone(), manifest);
        self.resolved.write().remove(&name);
        self.events.emit(&WidgetEvent::Registered { name });
    }

    /// Register several manifests.
    pub fn register_all(&self, manifests: impl IntoIterator<Item = WidgetManifest>) {
        for manifest in manifests {
            self.register(manifest);
        }
    }

    /// Remove a manifest and any resolved component. Returns `true` if the
    /// widget was registered.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.manifests.write().remove(name).is_some();
        self.resolved.write().remove(name);
        if removed {
            tracing::trace!(target: "objectui_core::widget", widget = %name, "unregistered widget");
            self.events.emit(&WidgetEvent::Unregistered {
                name: name.to_string(),
            });
        }
        removed
    }

    /// Whether a manifest is registered under the name.
    pub fn is_registered(&self, name: &str) -> bool {
        self.manifests.read().contains_key(name)
    }

    /// Whether the widget has been loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.resolved.read().contains_key(name)
    }

    /// The registered manifest for a name, if any.
    pub fn manifest(&self, name: &str) -> Option<WidgetManifest> {
        self.manifests.read().get(name).cloned()
    }

    /// The resolved widget for a name, if it has been loaded.
    pub fn resolved(&self, name: &str) -> Option<Arc<ResolvedWidget>> {
        self.resolved.read().get(name).cloned()
    }

    /// Load a widget, resolving its dependencies first.
    ///
    /// Dependencies are loaded recursively in the order listed; any
    /// dependency failure fails the dependent with [`WidgetError::Dependency`].
    /// A cyclic dependency chain is detected and reported as
    /// [`WidgetError::DependencyCycle`] instead of recursing forever.
    /// Successful loads are cached; a second call returns the cached
    /// [`ResolvedWidget`] without re-resolving.
    pub async fn load(&self, name: &str) -> WidgetResult<Arc<ResolvedWidget>> {
        self.load_inner(name.to_string(), Vec::new()).await
    }

    /// Load every registered widget independently.
    ///
    /// Per-widget failures are captured in the returned pairs rather than
    /// aborting the batch, so one bad plugin cannot block the others. Entries
    /// are returned in name order; no cross-widget loading order is
    /// guaranteed beyond each widget's own dependency chain.
    pub async fn load_all(&self) -> Vec<(String, WidgetResult<Arc<ResolvedWidget>>)> {
        let mut names: Vec<String> = self.manifests.read().keys().cloned().collect();
        names.sort();
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let result = self.load(&name).await;
            results.push((name, result));
        }
        results
    }

    /// Registration and load counts plus the distinct categories present.
    pub fn stats(&self) -> WidgetStats {
        let manifests = self.manifests.read();
        let mut categories: Vec<String> = manifests
            .values()
            .filter_map(|m| m.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        WidgetStats {
            registered: manifests.len(),
            loaded: self.resolved.read().len(),
            categories,
        }
    }

    fn load_inner(
        &self,
        name: String,
        stack: Vec<String>,
    ) -> BoxFuture<'_, WidgetResult<Arc<ResolvedWidget>>> {
        Box::pin(async move {
            if let Some(hit) = self.resolved.read().get(&name).cloned() {
                return Ok(hit);
            }

            if stack.contains(&name) {
                let mut chain = stack;
                chain.push(name.clone());
                return Err(self.fail(&name, WidgetError::DependencyCycle { chain }));
            }

            let Some(manifest) = self.manifests.read().get(&name).cloned() else {
                return Err(self.fail(&name, WidgetError::NotRegistered { name: name.clone() }));
            };

            let mut stack = stack;
            stack.push(name.clone());
            for dependency in &manifest.dependencies {
                if let Err(err) = self.load_inner(dependency.clone(), stack.clone()).await {
                    return Err(self.fail(
                        &name,
                        WidgetError::Dependency {
                            name: name.clone(),
                            dependency: dependency.clone(),
                            source: Box::new(err),
                        },
                    ));
                }
            }

            let component = match &manifest.source {
                WidgetSource::Inline(component) => component.clone(),
                WidgetSource::Registry { key } => match &self.components {
                    None => {
                        return Err(self.fail(
                            &name,
                            WidgetError::MissingComponentRegistry { name: name.clone() },
                        ));
                    }
                    Some(registry) => match registry.get(key) {
                        Some(component) => component,
                        None => {
                            return Err(self.fail(
                                &name,
                                WidgetError::MissingRegistryKey {
                                    name: name.clone(),
                                    key: key.clone(),
                                },
                            ));
                        }
                    },
                },
            };

            let widget = Arc::new(ResolvedWidget {
                manifest: manifest.clone(),
                component: component.clone(),
                loaded_at: Utc::now(),
            });
            self.resolved.write().insert(name.clone(), widget.clone());

            if let Some(registry) = &self.components {
                let mut meta = ComponentMeta::new(manifest.label.clone());
                meta.category = manifest.category.clone();
                registry.register_arc(manifest.widget_type.as_str(), component, meta);
            }

            tracing::debug!(
                target: "objectui_core::widget",
                widget = %name,
                widget_type = %manifest.widget_type,
                "loaded widget"
            );
            self.events.emit(&WidgetEvent::Loaded { name });
            Ok(widget)
        })
    }

    fn fail(&self, name: &str, err: WidgetError) -> WidgetError {
        tracing::debug!(
            target: "objectui_core::widget",
            widget = %name,
            error = %err,
            "widget load failed"
        );
        self.events.emit(&WidgetEvent::LoadFailed {
            name: name.to_string(),
            message: err.to_string(),
        });
        err
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("WidgetRegistry")
            .field("registered", &stats.registered)
            .field("loaded", &stats.loaded)
            .finish()
    }
}
