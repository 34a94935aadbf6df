//! High-level evaluation facade.
//!
//! [`ExpressionEngine`] ties the cache, the formula library, and the standard
//! context together behind three calls: [`evaluate`](ExpressionEngine::evaluate)
//! for bare expressions, [`evaluate_template`](ExpressionEngine::evaluate_template)
//! for `${...}` template strings, and
//! [`evaluate_bool`](ExpressionEngine::evaluate_bool) for schema conditions
//! that must degrade to a default instead of failing a render.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::ExpressionCache;
use crate::context::StandardContext;
use crate::error::{Error, Result};
use crate::value;

/// Shared expression evaluation service.
pub struct ExpressionEngine {
    cache: ExpressionCache,
}

impl ExpressionEngine {
    /// An engine with the standard formula library and default cache size.
    pub fn new() -> Self {
        Self {
            cache: ExpressionCache::default(),
        }
    }

    /// An engine over a caller-configured cache.
    pub fn with_cache(cache: ExpressionCache) -> Self {
        Self { cache }
    }

    /// The underlying cache, for stats and clearing.
    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// Evaluate a bare expression against a context.
    pub fn evaluate(&self, source: &str, ctx: &StandardContext) -> Result<Value> {
        let entry = self.cache.compile(source, &ctx.var_names())?;
        entry.expression().call(&ctx.args())
    }

    /// Evaluate a template string containing `${...}` placeholders.
    ///
    /// A string that is exactly one placeholder yields the raw expression
    /// value, preserving its type; a string mixing placeholders and literal
    /// text interpolates each value's display form; a string with no
    /// placeholders comes back unchanged.
    pub fn evaluate_template(&self, template: &str, ctx: &StandardContext) -> Result<Value> {
        let segments = split_template(template)?;
        if segments.is_empty() {
            return Ok(Value::String(String::new()));
        }
        if let [Segment::Expr(source)] = segments.as_slice() {
            return self.evaluate(source, ctx);
        }
        if segments.iter().all(|s| matches!(s, Segment::Literal(_))) {
            return Ok(Value::String(template.to_string()));
        }
        let mut out = String::new();
        for segment in &segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expr(source) => {
                    let v = self.evaluate(source, ctx)?;
                    out.push_str(&value::to_display(&v));
                }
            }
        }
        Ok(Value::String(out))
    }

    /// Evaluate a boolean condition, falling back to `default` on any
    /// failure. Schema conditions must never abort a render, so errors are
    /// logged and swallowed here.
    pub fn evaluate_bool(&self, source: &str, ctx: &StandardContext, default: bool) -> bool {
        match self.evaluate(source, ctx) {
            Ok(v) => value::truthy(&v),
            Err(error) => {
                tracing::debug!(
                    target: "objectui_expr::engine",
                    source,
                    %error,
                    default,
                    "condition failed to evaluate"
                );
                default
            }
        }
    }
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience alias used where the engine is shared across renderers.
pub type SharedEngine = Arc<ExpressionEngine>;

enum Segment {
    Literal(String),
    Expr(String),
}

fn split_template(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        literal.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(Error::parse(
                "unterminated '${' placeholder",
                template.len() - after.len() - 2,
            ));
        };
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Expr(after[..end].trim().to_string()));
        rest = &after[end + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
