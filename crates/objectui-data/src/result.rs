//! The uniform view data result shape.

use serde_json::Value;

/// Normalized result of resolving a data source.
///
/// Always fully shaped regardless of which provider path produced it, so
/// rendering code never special-cases partial failure: on error, `records`
/// is empty, `total` is zero, and `error` describes what went wrong.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ViewDataResult {
    /// Which provider produced this result.
    pub provider: String,
    /// The resolved records, in source order.
    pub records: Vec<Value>,
    /// Total record count, which may exceed `records.len()` for paged reads.
    pub total: u64,
    /// Whether a fetch is still in flight. Resolved results are never
    /// loading; the flag exists so callers can hold a loading placeholder
    /// with the same shape.
    pub loading: bool,
    /// Error description, when resolution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Object metadata, when the record fetcher supplied it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ViewDataResult {
    /// A successful result.
    pub fn ok(provider: impl Into<String>, records: Vec<Value>, total: u64) -> Self {
        Self {
            provider: provider.into(),
            records,
            total,
            loading: false,
            error: None,
            metadata: None,
        }
    }

    /// A failed result with empty, neutral data fields.
    pub fn error(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            records: Vec::new(),
            total: 0,
            loading: false,
            error: Some(message.into()),
            metadata: None,
        }
    }

    /// A placeholder for an in-flight fetch.
    pub fn loading(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            records: Vec::new(),
            total: 0,
            loading: true,
            error: None,
            metadata: None,
        }
    }

    /// Attach object metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether resolution failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
