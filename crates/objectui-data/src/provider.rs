//! The view data provider.
//!
//! Resolves a declarative data-source descriptor into a uniform
//! [`ViewDataResult`]. All failure modes — missing fetcher, network errors,
//! unparseable descriptors, unknown providers — come back in-band in the
//! result's `error` field so a render can proceed in a degraded state; no
//! error escapes [`ViewDataProvider::resolve`].

use std::sync::Arc;

use objectui_core::SchemaNode;
use parking_lot::RwLock;
use serde_json::Value;

use crate::fetcher::{RecordFetcher, UrlFetcher, UrlRequest};
use crate::result::ViewDataResult;
use crate::source::{ApiReadConfig, DataSource, ObjectQuery};

/// Resolves data-source descriptors through injected fetchers.
#[derive(Default)]
pub struct ViewDataProvider {
    url_fetcher: RwLock<Option<Arc<dyn UrlFetcher>>>,
    record_fetcher: RwLock<Option<Arc<dyn RecordFetcher>>>,
}

impl ViewDataProvider {
    /// A provider with no fetchers configured. `value` sources resolve;
    /// `api` and `object` sources produce descriptive error results until
    /// fetchers are injected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject the URL fetcher used by `api` sources.
    pub fn set_url_fetcher(&self, fetcher: Arc<dyn UrlFetcher>) {
        *self.url_fetcher.write() = Some(fetcher);
    }

    /// Inject the record fetcher used by `object` sources.
    pub fn set_record_fetcher(&self, fetcher: Arc<dyn RecordFetcher>) {
        *self.record_fetcher.write() = Some(fetcher);
    }

    /// Resolve a descriptor into a fully shaped result.
    pub async fn resolve(&self, descriptor: &Value) -> ViewDataResult {
        match DataSource::from_value(descriptor) {
            DataSource::Value { items } => {
                let total = items.len() as u64;
                ViewDataResult::ok("value", items, total)
            }
            DataSource::Api(config) => self.resolve_api(config).await,
            DataSource::Object { object, query } => self.resolve_object(&object, query).await,
            DataSource::Malformed { provider, message } => {
                ViewDataResult::error(provider, message)
            }
            DataSource::Unknown { provider } => ViewDataResult::error(
                provider.clone(),
                format!("unknown data provider '{provider}'"),
            ),
        }
    }

    /// Resolve an element-scoped object binding with explicit query
    /// overrides, for nested and related-record views. The element carries
    /// the object name and default query in its props.
    pub async fn resolve_element_data_source(
        &self,
        element: &SchemaNode,
        overrides: ObjectQuery,
    ) -> ViewDataResult {
        let Some(object) = element.get_str("object") else {
            return ViewDataResult::error("object", "element has no 'object' binding");
        };
        let query = ObjectQuery {
            filter: overrides.filter.or_else(|| element.get("filter").cloned()),
            sort: overrides.sort.or_else(|| element.get("sort").cloned()),
            limit: overrides
                .limit
                .or_else(|| element.get("limit").and_then(Value::as_u64)),
        };
        self.resolve_object(&object.to_string(), query).await
    }

    async fn resolve_api(&self, config: ApiReadConfig) -> ViewDataResult {
        let fetcher = self.url_fetcher.read().clone();
        let Some(fetcher) = fetcher else {
            return ViewDataResult::error(
                "api",
                "No fetchUrl implementation provided for api data source",
            );
        };
        let request = UrlRequest {
            url: config.url.clone(),
            method: config.method,
            headers: config.headers,
        };
        match fetcher.fetch_url(&request).await {
            Ok(body) => match normalize_response(&body) {
                Some((records, total)) => ViewDataResult::ok("api", records, total),
                None => {
                    tracing::debug!(
                        target: "objectui_data::provider",
                        url = %config.url,
                        "unrecognized api response shape"
                    );
                    ViewDataResult::error("api", "unrecognized response shape")
                }
            },
            Err(error) => {
                tracing::debug!(
                    target: "objectui_data::provider",
                    url = %config.url,
                    %error,
                    "api data source failed"
                );
                ViewDataResult::error("api", error.to_string())
            }
        }
    }

    async fn resolve_object(&self, object: &str, query: ObjectQuery) -> ViewDataResult {
        let fetcher = self.record_fetcher.read().clone();
        let Some(fetcher) = fetcher else {
            return ViewDataResult::error(
                "object",
                "No fetchRecords implementation provided for object data source",
            );
        };
        let page = match fetcher.fetch_records(object, &query).await {
            Ok(page) => page,
            Err(error) => {
                tracing::debug!(
                    target: "objectui_data::provider",
                    object,
                    %error,
                    "object data source failed"
                );
                return ViewDataResult::error("object", error.to_string());
            }
        };
        let total = page.total.unwrap_or(page.records.len() as u64);
        let mut result = ViewDataResult::ok("object", page.records, total);

        // Metadata is best effort; a failure never degrades the records.
        match fetcher.fetch_metadata(object).await {
            Ok(Some(metadata)) => result = result.with_metadata(metadata),
            Ok(None) => {}
            Err(error) => {
                tracing::debug!(
                    target: "objectui_data::provider",
                    object,
                    %error,
                    "metadata fetch failed"
                );
            }
        }
        result
    }
}

/// Normalize the response shapes `api` backends produce: a bare array,
/// `{data: [...]}`, or `{data: {records|items|rows: [...], total}}`.
fn normalize_response(body: &Value) -> Option<(Vec<Value>, u64)> {
    if let Value::Array(items) = body {
        return Some((items.clone(), items.len() as u64));
    }
    let data = body.get("data")?;
    if let Value::Array(items) = data {
        return Some((items.clone(), items.len() as u64));
    }
    let nested = data.as_object()?;
    let records = ["records", "items", "rows"]
        .iter()
        .find_map(|key| nested.get(*key))
        .and_then(Value::as_array)?;
    let total = nested
        .get("total")
        .and_then(Value::as_u64)
        .unwrap_or(records.len() as u64);
    Some((records.clone(), total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_bare_arrays() {
        let (records, total) = normalize_response(&json!([1, 2])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(total, 2);
    }

    #[test]
    fn normalizes_data_wrappers() {
        let (records, total) =
            normalize_response(&json!({"data": [{"id": 1}]})).unwrap();
        assert_eq!(records, vec![json!({"id": 1})]);
        assert_eq!(total, 1);

        let (records, total) = normalize_response(
            &json!({"data": {"rows": [{"id": 1}, {"id": 2}], "total": 40}}),
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(total, 40);
    }

    #[test]
    fn rejects_unrecognized_shapes() {
        assert!(normalize_response(&json!({"stuff": []})).is_none());
        assert!(normalize_response(&json!("text")).is_none());
    }
}
