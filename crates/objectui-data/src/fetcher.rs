//! Fetcher contracts the provider delegates to.
//!
//! The provider owns normalization and error containment; actual I/O happens
//! behind these traits so hosts can plug in HTTP, an in-process object store,
//! or test doubles.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::source::ObjectQuery;

/// A URL request as issued for `api` data sources.
#[derive(Debug, Clone)]
pub struct UrlRequest {
    /// Request URL.
    pub url: String,
    /// HTTP method.
    pub method: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
}

/// One page of records from an object read.
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    /// The records.
    pub records: Vec<Value>,
    /// Total matching records, when the backend knows it. Defaults to the
    /// page length otherwise.
    pub total: Option<u64>,
}

/// Issues HTTP reads for `api` data sources.
#[async_trait]
pub trait UrlFetcher: Send + Sync {
    /// Fetch the URL and return the decoded JSON body.
    async fn fetch_url(&self, request: &UrlRequest) -> Result<Value>;
}

/// Reads business-object records for `object` data sources.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetch records for `object` with the given query.
    async fn fetch_records(&self, object: &str, query: &ObjectQuery) -> Result<RecordPage>;

    /// Fetch object metadata (`{name, label, fields[]}`). The default
    /// reports no metadata support.
    async fn fetch_metadata(&self, object: &str) -> Result<Option<Value>> {
        let _ = object;
        Ok(None)
    }
}
