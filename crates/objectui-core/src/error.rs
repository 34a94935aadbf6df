//! Error types for the ObjectUI core.
//!
//! Most failure modes in the rendering pipeline are reported in-band — an
//! unregistered schema type becomes a [`RenderNode::Diagnostic`] subtree, a
//! data-provider failure becomes an `error` field on the result — so the typed
//! errors here cover only the surfaces where the caller is code rather than a
//! render tree: widget loading.
//!
//! [`RenderNode::Diagnostic`]: crate::render::RenderNode

/// Result type alias for widget registry operations.
pub type WidgetResult<T> = std::result::Result<T, WidgetError>;

/// Errors produced while loading widgets from a [`WidgetRegistry`].
///
/// Load failures are per-widget and recoverable: `load_all` converts them
/// into per-item results instead of aborting the batch.
///
/// [`WidgetRegistry`]: crate::widget::WidgetRegistry
#[derive(Debug, Clone, thiserror::Error)]
pub enum WidgetError {
    /// No manifest has been registered under the requested name.
    #[error("widget '{name}' is not registered")]
    NotRegistered {
        /// The widget name that was requested.
        name: String,
    },

    /// The widget declares a `Registry` source but the registry has no
    /// component registry attached.
    #[error("widget '{name}' has a registry source but no component registry is configured")]
    MissingComponentRegistry {
        /// The widget whose source could not be resolved.
        name: String,
    },

    /// The widget's `Registry` source names a key that is not present in the
    /// attached component registry.
    #[error("widget '{name}' references unknown component registry key '{key}'")]
    MissingRegistryKey {
        /// The widget whose source could not be resolved.
        name: String,
        /// The component registry key that was not found.
        key: String,
    },

    /// A dependency of the widget failed to load. The failure of the
    /// dependency is carried as the source error.
    #[error("widget '{name}' failed to load dependency '{dependency}': {source}")]
    Dependency {
        /// The widget whose load was aborted.
        name: String,
        /// The dependency that failed.
        dependency: String,
        /// Why the dependency failed.
        #[source]
        source: Box<WidgetError>,
    },

    /// The dependency graph contains a cycle. The chain lists the widgets on
    /// the cyclic path in load order, ending with the repeated name.
    #[error("widget dependency cycle detected: {}", chain.join(" -> "))]
    DependencyCycle {
        /// The widgets on the cyclic path.
        chain: Vec<String>,
    },
}

impl WidgetError {
    /// The name of the widget the error refers to.
    ///
    /// For dependency failures this is the dependent widget, not the
    /// dependency that actually failed; walk [`std::error::Error::source`]
    /// for the root cause.
    pub fn widget_name(&self) -> &str {
        match self {
            Self::NotRegistered { name }
            | Self::MissingComponentRegistry { name }
            | Self::MissingRegistryKey { name, .. }
            | Self::Dependency { name, .. } => name,
            Self::DependencyCycle { chain } => chain.first().map(String::as_str).unwrap_or(""),
        }
    }
}
