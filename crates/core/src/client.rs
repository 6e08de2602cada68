//! Lookup service boundary.
//!
//! The control treats the search service as a black box: given a query and a
//! page window it returns ranked candidates. `SearchClient` is the seam the
//! worker talks through; `HttpSearchClient` is the production implementation
//! over the service's HTTP interface.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tk_protocol::SearchResponse;

use crate::error::{SearchError, SearchResult};

/// Characters escaped when the query is embedded as a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Default per-request timeout for the HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Asynchronous lookup collaborator.
///
/// Implementations must tolerate concurrent calls: superseded requests are
/// never cancelled, only ignored when they settle.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Look up candidates matching `query` within the given page window.
    async fn search(&self, query: &str, limit: u32, offset: u32) -> SearchResult<SearchResponse>;
}

/// `SearchClient` over the service's HTTP interface.
///
/// Issues `GET {endpoint}/{query}?limit=N&offset=M` with the query
/// percent-encoded as a path segment, and decodes the JSON body into a
/// [`SearchResponse`].
#[derive(Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchClient {
    /// Create a client for the given endpoint base URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }

        Self { client, endpoint }
    }

    /// The endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, PATH_SEGMENT);
        format!("{}/{}", self.endpoint, encoded)
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &str, limit: u32, offset: u32) -> SearchResult<SearchResponse> {
        let response = self
            .client
            .get(self.url_for(query))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(SearchError::Payload)
    }
}
