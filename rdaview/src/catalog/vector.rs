//! Vector services catalog client.
//!
//! The catalog is queried with a Lucene-style query string and answers with a
//! JSON list of features, either bare or wrapped in a feature collection.
//!
//! # URL Pattern
//!
//! `{catalog_url}?q={query}&count={page_size}`

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use super::{CatalogError, CatalogRecord, HttpClient};

/// Catalog query interface.
///
/// Calls are blocking and fallible. Implementations own any retry policy;
/// the resolver never retries.
pub trait CatalogClient: Send + Sync {
    /// Run a query and return the matching records in catalog order.
    fn query(&self, query: &str) -> Result<Vec<CatalogRecord>, CatalogError>;
}

impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    fn query(&self, query: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
        (**self).query(query)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QueryResponse {
    Features(Vec<CatalogRecord>),
    Collection { features: Vec<CatalogRecord> },
}

/// Catalog client backed by the vector services HTTP API.
pub struct VectorServicesCatalog<C: HttpClient> {
    http_client: C,
    base_url: String,
    page_size: u32,
}

impl<C: HttpClient> VectorServicesCatalog<C> {
    /// Creates a new catalog client.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `base_url` - Query endpoint of the catalog
    /// * `page_size` - Maximum number of records requested per query
    pub fn new(http_client: C, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            page_size,
        }
    }

    /// Builds the request URL, percent-encoding the query.
    fn build_url(&self, query: &str) -> Result<String, CatalogError> {
        let count = self.page_size.to_string();
        reqwest::Url::parse_with_params(&self.base_url, &[("q", query), ("count", &count)])
            .map(String::from)
            .map_err(|e| {
                CatalogError::Http(format!("Invalid catalog URL '{}': {}", self.base_url, e))
            })
    }
}

impl<C: HttpClient> CatalogClient for VectorServicesCatalog<C> {
    fn query(&self, query: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
        let url = self.build_url(query)?;
        debug!(query, url = %url, "Querying catalog");

        let body = self.http_client.get(&url)?;
        let response: QueryResponse =
            serde_json::from_slice(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(match response {
            QueryResponse::Features(records) => records,
            QueryResponse::Collection { features } => features,
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::catalog::MockHttpClient;
    use std::sync::Mutex;

    /// In-memory catalog that records the queries it receives.
    pub struct MockCatalog {
        response: Mutex<Result<Vec<CatalogRecord>, CatalogError>>,
        queries: Mutex<Vec<String>>,
    }

    impl MockCatalog {
        pub fn new(records: Vec<CatalogRecord>) -> Self {
            Self {
                response: Mutex::new(Ok(records)),
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: CatalogError) -> Self {
            Self {
                response: Mutex::new(Err(error)),
                queries: Mutex::new(Vec::new()),
            }
        }

        /// Replace the records returned by later queries.
        pub fn set_records(&self, records: Vec<CatalogRecord>) {
            *self.response.lock().unwrap() = Ok(records);
        }

        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    impl CatalogClient for MockCatalog {
        fn query(&self, query: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.response.lock().unwrap().clone()
        }
    }

    const BASE_URL: &str = "https://catalog.example.com/api/vectors/query/items";

    fn features_json() -> Vec<u8> {
        br#"[
            {"properties": {"id": "p1", "attributes": {"vendorId": "X", "idahoImageId": "i1", "bucketName": "b"}}},
            {"properties": {"id": "p2", "attributes": {"vendorId": "Y", "idahoImageId": "i2", "bucketName": "b"}}}
        ]"#
        .to_vec()
    }

    #[test]
    fn test_url_construction() {
        let catalog =
            VectorServicesCatalog::new(MockHttpClient::new(Ok(Vec::new())), BASE_URL, 1000);
        let url = catalog
            .build_url("item_type:IDAHOImage AND attributes.catalogID:abc")
            .unwrap();

        assert!(url.starts_with(BASE_URL));
        assert!(url.contains("q=item_type%3AIDAHOImage+AND+attributes.catalogID%3Aabc"));
        assert!(url.ends_with("count=1000"));
    }

    #[test]
    fn test_invalid_base_url() {
        let catalog =
            VectorServicesCatalog::new(MockHttpClient::new(Ok(Vec::new())), "not a url", 10);
        assert!(matches!(
            catalog.query("anything"),
            Err(CatalogError::Http(_))
        ));
    }

    #[test]
    fn test_query_parses_feature_list() {
        let catalog =
            VectorServicesCatalog::new(MockHttpClient::new(Ok(features_json())), BASE_URL, 10);
        let records = catalog.query("q").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "p1");
        assert_eq!(records[1].attribute("vendorId"), Some("Y"));
    }

    #[test]
    fn test_query_parses_feature_collection() {
        let body = br#"{"type": "FeatureCollection", "features": [
            {"properties": {"id": "p1", "attributes": {}}}
        ]}"#
        .to_vec();
        let catalog = VectorServicesCatalog::new(MockHttpClient::new(Ok(body)), BASE_URL, 10);
        let records = catalog.query("q").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "p1");
    }

    #[test]
    fn test_query_parse_error() {
        let catalog = VectorServicesCatalog::new(
            MockHttpClient::new(Ok(b"<html>oops</html>".to_vec())),
            BASE_URL,
            10,
        );
        assert!(matches!(catalog.query("q"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_query_network_error() {
        let catalog = VectorServicesCatalog::new(
            MockHttpClient::new(Err(CatalogError::Http("Connection refused".to_string()))),
            BASE_URL,
            10,
        );
        match catalog.query("q") {
            Err(CatalogError::Http(msg)) => assert!(msg.contains("Connection refused")),
            other => panic!("Expected HttpError, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_catalog_records_queries() {
        let catalog = MockCatalog::new(Vec::new());
        catalog.query("one").unwrap();
        catalog.query("two").unwrap();
        assert_eq!(catalog.call_count(), 2);
        assert_eq!(catalog.queries(), vec!["one", "two"]);
    }
}
