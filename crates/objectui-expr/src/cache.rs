//! Compiled-expression cache.
//!
//! Compiling an expression tokenizes and parses it; doing that on every
//! render of a list with a thousand rows is wasted work, because schemas
//! reuse a small set of expression strings. The cache keys entries by the
//! pair (source text, variable-name list) — the binding context is part of
//! the identity, since the same text bound to different names compiles to a
//! different evaluator.
//!
//! Eviction is by hit count: when the cache is full, the least-used entry is
//! dropped. Recency is deliberately ignored, so a long-lived hot expression
//! survives bursts of one-off strings.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::Result;
use crate::eval::{self, PositionalScope};
use crate::functions::FunctionTable;
use crate::parser::{Expr, parse_expression};

/// Default entry capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// An expression compiled against a fixed, ordered variable-name list.
///
/// Calling it supplies the variable values positionally, matching the names
/// it was compiled with.
#[derive(Debug)]
pub struct CompiledExpression {
    source: String,
    var_names: Vec<String>,
    ast: Expr,
    functions: Arc<FunctionTable>,
}

impl CompiledExpression {
    /// Compile `source` against `var_names`, using `functions` for calls.
    pub fn compile(
        source: impl Into<String>,
        var_names: Vec<String>,
        functions: Arc<FunctionTable>,
    ) -> Result<Self> {
        let source = source.into();
        let ast = parse_expression(&source)?;
        Ok(Self {
            source,
            var_names,
            ast,
            functions,
        })
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The ordered variable names this expression was compiled against.
    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Evaluate with `args` bound positionally to the variable names.
    /// Missing trailing arguments read as `null`.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let scope = PositionalScope::new(&self.var_names, args);
        eval::evaluate(&self.ast, &scope, &self.functions)
    }
}

/// A cached compilation plus its usage count.
#[derive(Debug)]
pub struct CacheEntry {
    expression: CompiledExpression,
    hits: AtomicU64,
}

impl CacheEntry {
    /// The compiled expression.
    pub fn expression(&self) -> &CompiledExpression {
        &self.expression
    }

    /// Times this entry has been returned from [`ExpressionCache::compile`],
    /// counting the initial compilation.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source: String,
    var_names: Vec<String>,
}

/// Point-in-time cache statistics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    /// Number of cached entries.
    pub size: usize,
    /// Sum of hit counts across entries.
    pub total_hits: u64,
    /// `(source, hits)` pairs sorted by descending hits.
    pub entries: Vec<(String, u64)>,
}

/// Bounded cache of compiled expressions.
pub struct ExpressionCache {
    capacity: usize,
    functions: Arc<FunctionTable>,
    entries: Mutex<HashMap<CacheKey, Arc<CacheEntry>>>,
}

impl ExpressionCache {
    /// A cache over the standard formula library.
    pub fn new(capacity: usize) -> Self {
        Self::with_functions(capacity, Arc::new(FunctionTable::standard()))
    }

    /// A cache over a caller-supplied function table. Capacity is clamped to
    /// at least one entry.
    pub fn with_functions(capacity: usize, functions: Arc<FunctionTable>) -> Self {
        Self {
            capacity: capacity.max(1),
            functions,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The function table shared by every compilation.
    pub fn functions(&self) -> &Arc<FunctionTable> {
        &self.functions
    }

    /// Fetch or compile the entry for `(source, var_names)`.
    ///
    /// A hit increments the entry's count and returns the same entry
    /// instance; a miss compiles, stores with a count of one, and evicts the
    /// lowest-hit entry if the cache is full.
    pub fn compile<S>(&self, source: S, var_names: &[String]) -> Result<Arc<CacheEntry>>
    where
        S: AsRef<str>,
    {
        let key = CacheKey {
            source: source.as_ref().to_string(),
            var_names: var_names.to_vec(),
        };

        if let Some(entry) = self.entries.lock().get(&key) {
            entry.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(entry));
        }

        // Parse outside the lock; failures never occupy a slot.
        let expression = CompiledExpression::compile(
            key.source.clone(),
            key.var_names.clone(),
            Arc::clone(&self.functions),
        )?;
        let entry = Arc::new(CacheEntry {
            expression,
            hits: AtomicU64::new(1),
        });

        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&key) {
            // Raced with another compile of the same key.
            existing.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(existing));
        }
        if entries.len() >= self.capacity {
            let coldest = entries
                .iter()
                .min_by_key(|(_, e)| e.hits())
                .map(|(k, _)| k.clone());
            if let Some(coldest) = coldest {
                tracing::trace!(
                    target: "objectui_expr::cache",
                    source = %coldest.source,
                    "evicting least-used expression"
                );
                entries.remove(&coldest);
            }
        }
        entries.insert(key, Arc::clone(&entry));
        Ok(entry)
    }

    /// Whether `(source, var_names)` is cached, without touching hit counts.
    pub fn has(&self, source: &str, var_names: &[String]) -> bool {
        let key = CacheKey {
            source: source.to_string(),
            var_names: var_names.to_vec(),
        };
        self.entries.lock().contains_key(&key)
    }

    /// Current statistics, entries sorted most-used first.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let mut listed: Vec<(String, u64)> = entries
            .iter()
            .map(|(k, e)| (k.source.clone(), e.hits()))
            .collect();
        listed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        CacheStats {
            size: entries.len(),
            total_hits: listed.iter().map(|(_, h)| h).sum(),
            entries: listed,
        }
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
