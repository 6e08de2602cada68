//! Search result data models.
//!
//! These structures mirror the lookup service's JSON wire format:
//!
//! ```json
//! {
//!   "results": [
//!     { "id": "42", "name": "Rust", "updateAt": "...", "createdAt": "...", "createdBy": "..." }
//!   ],
//!   "totalResults": 137
//! }
//! ```
//!
//! The service's ranking order is authoritative; nothing in this workspace
//! re-sorts candidates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single selectable search result entity.
///
/// Candidates are immutable once returned by the service. Only `id` and
/// `name` participate in display and commit logic; the provenance fields
/// ride along untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Unique identifier assigned by the service.
    pub id: String,

    /// Display label shown in the overlay.
    pub name: String,

    /// When the entity was last updated, if the service reports it.
    #[serde(default)]
    pub update_at: Option<DateTime<Utc>>,

    /// When the entity was created, if the service reports it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Who created the entity, if the service reports it.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// One page of ranked matches plus the reported total.
///
/// `total_results` counts matches on the server and may exceed
/// `results.len()`; only a page is returned.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Ranked candidates, service order preserved.
    #[serde(default)]
    pub results: Vec<Candidate>,

    /// Total number of matches known to the server.
    #[serde(default)]
    #[ts(type = "number")]
    pub total_results: u64,
}

/// Parameters of one issued lookup, tagged with its request epoch.
///
/// The tag is a monotonically increasing counter assigned at issue time.
/// Replies may settle out of order; a reply is applied only if its tag still
/// matches the most recently issued one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Monotonic identity of this request.
    #[ts(type = "number")]
    pub request_id: u64,

    /// Query text captured when the quiet window elapsed.
    pub query: String,

    /// Page size requested from the service.
    #[ts(type = "number")]
    pub limit: u32,

    /// Page offset requested from the service.
    #[ts(type = "number")]
    pub offset: u32,
}
