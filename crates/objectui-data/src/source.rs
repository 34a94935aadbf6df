//! Declarative data-source descriptors.
//!
//! A schema carries its data binding as a plain object with a `provider`
//! discriminator. Parsing is deliberately forgiving: an unknown or malformed
//! descriptor becomes a variant the provider turns into an in-band error
//! result, never a parse failure that aborts rendering.

use serde_json::{Map, Value};

/// How an API read should be issued.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReadConfig {
    /// Request URL.
    pub url: String,
    /// HTTP method, defaulting to GET.
    pub method: String,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
}

/// Filter, sort, and limit options for object reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectQuery {
    /// Filter expression, passed through to the record fetcher.
    pub filter: Option<Value>,
    /// Sort specification.
    pub sort: Option<Value>,
    /// Maximum number of records.
    pub limit: Option<u64>,
}

/// A parsed data-source descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Literal records carried inline by the schema.
    Value {
        /// The items, empty when the schema omitted them or supplied a
        /// non-array.
        items: Vec<Value>,
    },
    /// An HTTP read through the injected URL fetcher.
    Api(ApiReadConfig),
    /// A business-object read through the injected record fetcher.
    Object {
        /// The object name.
        object: String,
        /// Query options.
        query: ObjectQuery,
    },
    /// A recognized provider whose configuration is unusable.
    Malformed {
        /// The provider discriminator.
        provider: String,
        /// What is wrong with it.
        message: String,
    },
    /// A provider value this core does not know.
    Unknown {
        /// The offending discriminator.
        provider: String,
    },
}

impl DataSource {
    /// Parse a descriptor value.
    pub fn from_value(descriptor: &Value) -> Self {
        let Some(map) = descriptor.as_object() else {
            return Self::Unknown {
                provider: String::new(),
            };
        };
        let provider = map
            .get("provider")
            .and_then(Value::as_str)
            .unwrap_or_default();
        match provider {
            "value" => Self::Value {
                items: map
                    .get("items")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
            },
            "api" => parse_api(map),
            "object" => parse_object(map),
            other => Self::Unknown {
                provider: other.to_string(),
            },
        }
    }

    /// The provider discriminator this source was parsed from.
    pub fn provider(&self) -> &str {
        match self {
            Self::Value { .. } => "value",
            Self::Api(_) => "api",
            Self::Object { .. } => "object",
            Self::Malformed { provider, .. } | Self::Unknown { provider } => provider,
        }
    }
}

fn parse_api(map: &Map<String, Value>) -> DataSource {
    let Some(read) = map.get("read").and_then(Value::as_object) else {
        return DataSource::Malformed {
            provider: "api".to_string(),
            message: "missing 'read' configuration".to_string(),
        };
    };
    let Some(url) = read.get("url").and_then(Value::as_str) else {
        return DataSource::Malformed {
            provider: "api".to_string(),
            message: "missing 'read.url'".to_string(),
        };
    };
    let method = read
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or("GET")
        .to_uppercase();
    let headers = read
        .get("headers")
        .and_then(Value::as_object)
        .map(|h| {
            h.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();
    DataSource::Api(ApiReadConfig {
        url: url.to_string(),
        method,
        headers,
    })
}

fn parse_object(map: &Map<String, Value>) -> DataSource {
    let Some(object) = map.get("object").and_then(Value::as_str) else {
        return DataSource::Malformed {
            provider: "object".to_string(),
            message: "missing 'object' name".to_string(),
        };
    };
    DataSource::Object {
        object: object.to_string(),
        query: ObjectQuery {
            filter: map.get("filter").cloned(),
            sort: map.get("sort").cloned(),
            limit: map.get("limit").and_then(Value::as_u64),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_value_provider() {
        let source = DataSource::from_value(&json!({
            "provider": "value",
            "items": [{"id": 1}],
        }));
        assert_eq!(
            source,
            DataSource::Value {
                items: vec![json!({"id": 1})]
            }
        );
    }

    #[test]
    fn value_without_items_is_empty() {
        let source = DataSource::from_value(&json!({"provider": "value", "items": 42}));
        assert_eq!(source, DataSource::Value { items: vec![] });
    }

    #[test]
    fn parses_api_provider() {
        let source = DataSource::from_value(&json!({
            "provider": "api",
            "read": {"url": "https://x.test/items", "method": "post",
                     "headers": {"X-Org": "acme"}},
        }));
        let DataSource::Api(config) = source else {
            panic!("expected api source");
        };
        assert_eq!(config.url, "https://x.test/items");
        assert_eq!(config.method, "POST");
        assert_eq!(config.headers, vec![("X-Org".to_string(), "acme".to_string())]);
    }

    #[test]
    fn api_without_url_is_malformed() {
        let source = DataSource::from_value(&json!({"provider": "api", "read": {}}));
        assert!(matches!(source, DataSource::Malformed { .. }));
    }

    #[test]
    fn parses_object_provider() {
        let source = DataSource::from_value(&json!({
            "provider": "object",
            "object": "contact",
            "limit": 25,
        }));
        let DataSource::Object { object, query } = source else {
            panic!("expected object source");
        };
        assert_eq!(object, "contact");
        assert_eq!(query.limit, Some(25));
    }

    #[test]
    fn unknown_provider_is_preserved() {
        let source = DataSource::from_value(&json!({"provider": "graphql"}));
        assert_eq!(source.provider(), "graphql");
        assert!(matches!(source, DataSource::Unknown { .. }));
    }
}
