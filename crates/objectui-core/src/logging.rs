//! Logging and debugging facilities for ObjectUI.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for render output trees
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! ObjectUI uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`format_render_tree`] to inspect what a render pass produced:
//!
//! ```ignore
//! use objectui_core::logging::{format_render_tree, TreeFormatOptions};
//!
//! let out = renderer.render(&schema);
//! println!("{}", format_render_tree(&out, &TreeFormatOptions::default()));
//! ```

use std::fmt::Write as FmtWrite;

use crate::render::RenderNode;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "objectui_core";
    /// Component registry target.
    pub const REGISTRY: &str = "objectui_core::registry";
    /// Widget registry target.
    pub const WIDGET: &str = "objectui_core::widget";
    /// Schema renderer target.
    pub const RENDER: &str = "objectui_core::render";
    /// Expression engine target (emitted by the expr crate).
    pub const EXPR: &str = "objectui_expr";
    /// Data provider target (emitted by the data crate).
    pub const DATA: &str = "objectui_data::provider";
}

/// RAII guard that keeps a performance span active until dropped.
///
/// Spans are emitted at `info` level under the `objectui::perf` target so
/// they can be enabled independently of regular logging.
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "objectui::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Style options for render tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for render tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element attributes.
    pub show_attrs: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_attrs: true,
            max_depth: None,
        }
    }
}

/// Format a render tree as an indented branch diagram.
pub fn format_render_tree(node: &RenderNode, options: &TreeFormatOptions) -> String {
    let mut out = String::new();
    format_node(node, options, "", true, true, 0, &mut out);
    out
}

fn format_node(
    node: &RenderNode,
    options: &TreeFormatOptions,
    prefix: &str,
    is_root: bool,
    is_last: bool,
    depth: usize,
    out: &mut String,
) {
    if let Some(max) = options.max_depth {
        if depth > max {
            return;
        }
    }

    let (branch, pipe) = match options.style {
        TreeStyle::Ascii => {
            if is_last {
                ("`-- ", "    ")
            } else {
                ("|-- ", "|   ")
            }
        }
        TreeStyle::Unicode => {
            if is_last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            }
        }
    };

    if is_root {
        let _ = writeln!(out, "{}", describe(node, options));
    } else {
        let _ = writeln!(out, "{prefix}{branch}{}", describe(node, options));
    }

    let child_prefix = if is_root {
        String::new()
    } else {
        format!("{prefix}{pipe}")
    };
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        format_node(
            child,
            options,
            &child_prefix,
            false,
            i + 1 == children.len(),
            depth + 1,
            out,
        );
    }
}

fn describe(node: &RenderNode, options: &TreeFormatOptions) -> String {
    match node {
        RenderNode::Element { tag, attrs, .. } => {
            if options.show_attrs && !attrs.is_empty() {
                let keys: Vec<&str> = attrs.keys().map(String::as_str).collect();
                format!("<{tag}> [{}]", keys.join(", "))
            } else {
                format!("<{tag}>")
            }
        }
        RenderNode::Text { text } => format!("\"{text}\""),
        RenderNode::Diagnostic { message, .. } => format!("!! {message}"),
        RenderNode::Empty => "(empty)".to_string(),
    }
}
