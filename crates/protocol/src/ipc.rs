//! Inter-task communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the UI loop and the search worker.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from the UI to the worker
//! - `Event`: Settled lookups reported back from the worker to the UI
//!
//! Communication is channel-based, so the interface stays responsive while
//! lookups are in flight. In-flight lookups are never cancelled; a reply for
//! a superseded request is discarded on the UI side by its epoch tag.
//!
//! Uses tagged enum serialization for TypeScript compatibility:
//! ```json
//! {
//!   "type": "searchCompleted",
//!   "payload": { "request_id": 3, "response": { "results": [], "totalResults": 0 } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::search_models::{SearchRequest, SearchResponse};

/// Operations sent from the UI to the search worker.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Execute a lookup for the given tagged request.
    Search {
        /// The request parameters, including the epoch tag that identifies
        /// this issue.
        request: SearchRequest,
    },

    /// Stop the worker loop.
    ///
    /// Lookups already in flight are left to settle; their replies are
    /// discarded by the staleness check on the UI side.
    Shutdown,
}

/// Events sent from the search worker to the UI.
///
/// Every issued request settles with exactly one of these, carrying the
/// request's epoch tag so the UI can discard superseded replies.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A lookup settled successfully.
    SearchCompleted {
        /// Epoch tag of the request this reply belongs to.
        #[ts(type = "number")]
        request_id: u64,
        /// The decoded result page.
        response: SearchResponse,
    },

    /// A lookup failed (transport error, non-success status, or malformed
    /// payload).
    SearchFailed {
        /// Epoch tag of the request this reply belongs to.
        #[ts(type = "number")]
        request_id: u64,
        /// Human-readable failure description, already logged at the worker.
        error: String,
    },
}
