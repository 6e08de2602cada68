//! Mock search client implementations for deterministic testing.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tk_core::{SearchClient, SearchError, SearchResult};
use tk_protocol::{Candidate, SearchResponse};

/// Build a candidate fixture with only the fields display logic uses.
pub fn candidate(id: &str, name: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        update_at: None,
        created_at: None,
        created_by: None,
    }
}

/// A mock client that serves canned responses per query.
///
/// Each reply can be delayed to exercise out-of-order settlement, and every
/// call is recorded so tests can assert on request counts.
pub struct MockSearchClient {
    responses: Mutex<HashMap<String, SearchResponse>>,
    delays: Mutex<HashMap<String, Duration>>,
    failures: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockSearchClient {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script a successful reply for `query`.
    #[allow(dead_code)]
    pub fn with_response(self, query: &str, candidates: Vec<Candidate>) -> Self {
        let total = candidates.len() as u64;
        self.responses.lock().unwrap().insert(
            query.to_string(),
            SearchResponse {
                results: candidates,
                total_results: total,
            },
        );
        self
    }

    /// Delay the reply for `query` by `delay`.
    #[allow(dead_code)]
    pub fn with_delay(self, query: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(query.to_string(), delay);
        self
    }

    /// Script a failing reply for `query`.
    #[allow(dead_code)]
    pub fn with_failure(self, query: &str, message: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(query.to_string(), message.to_string());
        self
    }

    /// Queries received so far, in call order.
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &str, _limit: u32, _offset: u32) -> SearchResult<SearchResponse> {
        self.calls.lock().unwrap().push(query.to_string());

        let delay = self.delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.failures.lock().unwrap().get(query) {
            return Err(SearchError::Status {
                status: 500,
                message: message.clone(),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
