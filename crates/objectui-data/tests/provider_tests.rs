//! Tests for the view data provider.

use std::sync::Arc;

use async_trait::async_trait;
use objectui_core::SchemaNode;
use objectui_data::{
    FetchError, HttpUrlFetcher, ObjectQuery, RecordFetcher, RecordPage, UrlFetcher, UrlRequest,
    ViewDataProvider, ViewDataResult,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// URL fetcher returning a canned body.
struct CannedFetcher {
    body: Value,
}

#[async_trait]
impl UrlFetcher for CannedFetcher {
    async fn fetch_url(&self, _request: &UrlRequest) -> Result<Value, FetchError> {
        Ok(self.body.clone())
    }
}

/// URL fetcher that always fails.
struct FailingFetcher;

#[async_trait]
impl UrlFetcher for FailingFetcher {
    async fn fetch_url(&self, _request: &UrlRequest) -> Result<Value, FetchError> {
        Err(FetchError::Request("connection refused".to_string()))
    }
}

/// Record fetcher over a fixed record set, remembering the queries it saw.
struct StubRecords {
    records: Vec<Value>,
    metadata: Option<Value>,
    seen: Mutex<Vec<(String, ObjectQuery)>>,
}

impl StubRecords {
    fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            metadata: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[async_trait]
impl RecordFetcher for StubRecords {
    async fn fetch_records(
        &self,
        object: &str,
        query: &ObjectQuery,
    ) -> Result<RecordPage, FetchError> {
        if object == "missing" {
            return Err(FetchError::UnknownObject(object.to_string()));
        }
        self.seen.lock().push((object.to_string(), query.clone()));
        Ok(RecordPage {
            records: self.records.clone(),
            total: Some(100),
        })
    }

    async fn fetch_metadata(&self, _object: &str) -> Result<Option<Value>, FetchError> {
        Ok(self.metadata.clone())
    }
}

#[tokio::test]
async fn test_value_source_wraps_items() {
    let provider = ViewDataProvider::new();
    let result = provider
        .resolve(&json!({"provider": "value", "items": [{"id": 1}, {"id": 2}]}))
        .await;

    assert_eq!(result.provider, "value");
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.total, 2);
    assert!(!result.loading);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_value_source_tolerates_missing_items() {
    let provider = ViewDataProvider::new();
    for descriptor in [
        json!({"provider": "value"}),
        json!({"provider": "value", "items": "oops"}),
    ] {
        let result = provider.resolve(&descriptor).await;
        assert!(result.records.is_empty());
        assert!(result.error.is_none());
    }
}

#[tokio::test]
async fn test_api_without_fetcher_is_a_descriptive_error() {
    let provider = ViewDataProvider::new();
    let result = provider
        .resolve(&json!({"provider": "api", "read": {"url": "https://x.test/items"}}))
        .await;

    assert!(result.records.is_empty());
    assert_eq!(result.total, 0);
    let error = result.error.expect("expected an error");
    assert!(error.contains("No fetchUrl implementation"), "{error}");
}

#[tokio::test]
async fn test_api_normalizes_response_shapes() {
    let provider = ViewDataProvider::new();
    let descriptor = json!({"provider": "api", "read": {"url": "https://x.test/items"}});

    let shapes = [
        (json!([{"id": 1}]), 1u64),
        (json!({"data": [{"id": 1}, {"id": 2}]}), 2),
        (json!({"data": {"records": [{"id": 1}], "total": 55}}), 55),
    ];
    for (body, expected_total) in shapes {
        provider.set_url_fetcher(Arc::new(CannedFetcher { body }));
        let result = provider.resolve(&descriptor).await;
        assert!(result.error.is_none());
        assert_eq!(result.total, expected_total);
    }
}

#[tokio::test]
async fn test_api_failure_is_contained() {
    let provider = ViewDataProvider::new();
    provider.set_url_fetcher(Arc::new(FailingFetcher));
    let result = provider
        .resolve(&json!({"provider": "api", "read": {"url": "https://x.test/items"}}))
        .await;

    assert!(result.records.is_empty());
    assert!(result.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_object_source_with_metadata() {
    let provider = ViewDataProvider::new();
    provider.set_record_fetcher(Arc::new(
        StubRecords::new(vec![json!({"id": 1})])
            .with_metadata(json!({"name": "contact", "fields": []})),
    ));

    let result = provider
        .resolve(&json!({"provider": "object", "object": "contact", "limit": 10}))
        .await;

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.total, 100);
    assert_eq!(result.metadata, Some(json!({"name": "contact", "fields": []})));
}

#[tokio::test]
async fn test_object_source_without_fetcher() {
    let provider = ViewDataProvider::new();
    let result = provider
        .resolve(&json!({"provider": "object", "object": "contact"}))
        .await;
    assert!(result.error.unwrap().contains("No fetchRecords implementation"));
}

#[tokio::test]
async fn test_object_fetch_failure_is_contained() {
    let provider = ViewDataProvider::new();
    provider.set_record_fetcher(Arc::new(StubRecords::new(vec![])));
    let result = provider
        .resolve(&json!({"provider": "object", "object": "missing"}))
        .await;
    assert!(result.error.unwrap().contains("unknown object 'missing'"));
}

#[tokio::test]
async fn test_unknown_provider_named_in_error() {
    let provider = ViewDataProvider::new();
    let result = provider.resolve(&json!({"provider": "graphql"})).await;
    assert_eq!(result.provider, "graphql");
    assert!(result.error.unwrap().contains("graphql"));
}

#[tokio::test]
async fn test_element_data_source_overrides() {
    let provider = ViewDataProvider::new();
    let fetcher = Arc::new(StubRecords::new(vec![json!({"id": 1})]));
    provider.set_record_fetcher(fetcher.clone());

    let element = SchemaNode::new("related-list")
        .with_prop("object", json!("deal"))
        .with_prop("limit", json!(5))
        .with_prop("sort", json!("-created"));

    let overrides = ObjectQuery {
        limit: Some(2),
        ..Default::default()
    };
    let result = provider.resolve_element_data_source(&element, overrides).await;
    assert!(result.error.is_none());

    let seen = fetcher.seen.lock();
    let (object, query) = &seen[0];
    assert_eq!(object, "deal");
    // Override wins over the element's own limit; sort falls through.
    assert_eq!(query.limit, Some(2));
    assert_eq!(query.sort, Some(json!("-created")));
}

#[tokio::test]
async fn test_http_fetcher_against_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(header("x-org", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"items": [{"id": 1}, {"id": 2}], "total": 2}
        })))
        .mount(&server)
        .await;

    let provider = ViewDataProvider::new();
    provider.set_url_fetcher(Arc::new(HttpUrlFetcher::new().unwrap()));

    let result = provider
        .resolve(&json!({
            "provider": "api",
            "read": {
                "url": format!("{}/api/items", server.uri()),
                "headers": {"x-org": "acme"},
            },
        }))
        .await;

    assert!(result.error.is_none(), "{:?}", result.error);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.total, 2);
}

#[tokio::test]
async fn test_http_fetcher_error_status_is_contained() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let provider = ViewDataProvider::new();
    provider.set_url_fetcher(Arc::new(HttpUrlFetcher::new().unwrap()));

    let result = provider
        .resolve(&json!({
            "provider": "api",
            "read": {"url": format!("{}/api/broken", server.uri())},
        }))
        .await;

    let error = result.error.expect("expected an error");
    assert!(error.contains("500"), "{error}");
    assert!(result.records.is_empty());
}

#[test]
fn test_loading_placeholder_keeps_the_result_shape() {
    let placeholder = ViewDataResult::loading("object");
    assert!(placeholder.loading);
    assert!(placeholder.records.is_empty());
    assert_eq!(placeholder.total, 0);
    assert!(!placeholder.is_error());

    // Serializes with the same keys a resolved result carries, so consumers
    // can swap the placeholder out without reshaping.
    let encoded = serde_json::to_value(&placeholder).expect("serializable");
    assert_eq!(
        encoded,
        json!({"provider": "object", "records": [], "total": 0, "loading": true})
    );
}
