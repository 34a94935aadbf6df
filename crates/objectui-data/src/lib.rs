//! Data resolution for ObjectUI.
//!
//! Schemas describe where their records come from with a small declarative
//! descriptor — inline values, an HTTP API, or a named business object. This
//! crate parses those descriptors and resolves them into one uniform result
//! shape, delegating actual I/O to injected fetcher implementations:
//!
//! - [`DataSource`] — the parsed descriptor (`value` | `api` | `object`).
//! - [`ViewDataProvider`] — resolution plus error containment; every failure
//!   comes back in-band in [`ViewDataResult::error`].
//! - [`UrlFetcher`] / [`RecordFetcher`] — the injection points, with
//!   [`HttpUrlFetcher`] as the reqwest-backed default for `api` sources.
//!
//! # Example
//!
//! ```
//! use objectui_data::ViewDataProvider;
//! use serde_json::json;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let provider = ViewDataProvider::new();
//! let result = provider
//!     .resolve(&json!({"provider": "value", "items": [{"id": 1}, {"id": 2}]}))
//!     .await;
//! assert_eq!(result.records.len(), 2);
//! assert_eq!(result.total, 2);
//! assert!(result.error.is_none());
//! # });
//! ```

mod error;
pub mod fetcher;
pub mod http;
pub mod provider;
pub mod result;
pub mod source;

pub use error::{FetchError, Result};
pub use fetcher::{RecordFetcher, RecordPage, UrlFetcher, UrlRequest};
pub use http::{HttpUrlFetcher, HttpUrlFetcherBuilder};
pub use provider::ViewDataProvider;
pub use result::ViewDataResult;
pub use source::{ApiReadConfig, DataSource, ObjectQuery};
